use std::str::FromStr;

use serde::Deserialize;

use crate::error::CoreError;

/// How a descriptor blob is stored in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// LDIF export; the attribute is looked up by DN.
    Ldif,
    Base64,
    Hex,
    Raw,
}

impl InputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ldif => "ldif",
            Self::Base64 => "base64",
            Self::Hex => "hex",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ldif" => Ok(Self::Ldif),
            "base64" => Ok(Self::Base64),
            "hex" => Ok(Self::Hex),
            "raw" => Ok(Self::Raw),
            other => Err(CoreError::InvalidConfiguration(format!(
                "unknown input format: {other}"
            ))),
        }
    }
}

/// How a decoded descriptor is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Indented name/value tree.
    Text,
    Json,
    /// Re-encoded descriptor bytes.
    Hex,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Hex => "hex",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "hex" => Ok(Self::Hex),
            other => Err(CoreError::InvalidConfiguration(format!(
                "unknown output format: {other}"
            ))),
        }
    }
}
