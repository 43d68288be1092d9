/// Directory attribute that carries a security descriptor on AD objects.
pub const SECURITY_DESCRIPTOR_ATTRIBUTE: &str = "nTSecurityDescriptor";

pub const BINARY_NAME: &str = "ntsd";

/// Optional configuration file read from the working directory.
pub const CONFIG_FILE_STEM: &str = BINARY_NAME;
pub const CONFIG_FILE_NAME: &str = const_str::concat!(CONFIG_FILE_STEM, ".toml");
