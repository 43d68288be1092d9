//! Command-line arguments and their merge with loaded settings.

use std::path::PathBuf;

use clap::Parser;
use ntsd_core::config::Settings;
use ntsd_core::constants::{BINARY_NAME, CONFIG_FILE_NAME};
use ntsd_core::error::CoreError;
use ntsd_core::types::{InputFormat, OutputFormat};

use crate::error::AppResult;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str = const_str::concat!(
    "Decodes a Windows security descriptor (nTSecurityDescriptor) and prints it.\n\n",
    "Input is an LDIF export searched by --dn, or a file holding one descriptor as raw ",
    "bytes, base64 or hex. Defaults come from LOGGING_LEVEL, INPUT_FORMAT, ",
    "INPUT_ATTRIBUTE and OUTPUT_FORMAT, then from ",
    CONFIG_FILE_NAME,
    " in the working directory. Flags override both."
);

#[derive(Parser, Debug)]
#[command(
    name = BINARY_NAME,
    version = VERSION,
    about = "Security descriptor decoder",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// Input file.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Distinguished name of the entry to read (LDIF input).
    #[arg(long, value_name = "DN")]
    pub dn: Option<String>,

    /// Input encoding: ldif, base64, hex or raw.
    #[arg(short, long, value_name = "FORMAT")]
    pub input: Option<InputFormat>,

    /// Output format: text, json or hex.
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Attribute holding the descriptor (LDIF input).
    #[arg(long, value_name = "NAME")]
    pub attribute: Option<String>,

    /// Log filter, e.g. `debug` or `ntsd_dtyp=trace`.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub path: PathBuf,
    pub dn: String,
    pub input: InputFormat,
    pub output: OutputFormat,
    pub attribute: String,
    pub log_level: String,
}

impl Cli {
    /// ## Summary
    /// Merges flags over loaded settings; flags win.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if LDIF input is selected without `--dn`.
    pub fn resolve(self, settings: &Settings) -> AppResult<RunOptions> {
        let input = self.input.unwrap_or(settings.input.format);

        let dn = match (input, self.dn) {
            (_, Some(dn)) => dn,
            (InputFormat::Ldif, None) => {
                let message = "--dn is required for LDIF input".to_string();
                return Err(CoreError::InvalidInput(message).into());
            }
            (_, None) => String::new(),
        };

        Ok(RunOptions {
            path: self.path,
            dn,
            input,
            output: self.output.unwrap_or(settings.output.format),
            attribute: self
                .attribute
                .unwrap_or_else(|| settings.input.attribute.clone()),
            log_level: self
                .log_level
                .unwrap_or_else(|| settings.logging.level.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn settings() -> Settings {
        Settings::defaults().expect("defaults")
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "ntsd",
            "blob.txt",
            "-i",
            "HEX",
            "--output",
            "json",
            "--log-level",
            "debug",
        ]);
        let options = cli.resolve(&settings()).expect("resolves");
        assert_eq!(options.input, InputFormat::Hex);
        assert_eq!(options.output, OutputFormat::Json);
        assert_eq!(options.log_level, "debug");
        assert_eq!(options.attribute, "nTSecurityDescriptor");
        assert!(options.dn.is_empty());
    }

    #[test]
    fn settings_fill_missing_flags() {
        let cli = Cli::parse_from(["ntsd", "export.ldif", "--dn", "CN=A,DC=example"]);
        let options = cli.resolve(&settings()).expect("resolves");
        assert_eq!(options.input, InputFormat::Ldif);
        assert_eq!(options.output, OutputFormat::Text);
        assert_eq!(options.log_level, "info");
        assert_eq!(options.dn, "CN=A,DC=example");
    }

    #[test]
    fn ldif_requires_dn() {
        let cli = Cli::parse_from(["ntsd", "export.ldif"]);
        let err = cli.resolve(&settings()).unwrap_err();
        assert!(matches!(
            err,
            AppError::CoreError(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let parsed = Cli::try_parse_from(["ntsd", "x", "--input", "pem"]);
        assert!(parsed.is_err());
    }
}
