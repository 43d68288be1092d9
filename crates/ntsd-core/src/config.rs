use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_STEM, SECURITY_DESCRIPTOR_ATTRIBUTE};
use crate::types::{InputFormat, OutputFormat};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub format: InputFormat,
    /// Attribute holding the descriptor in LDIF input.
    pub attribute: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `ntsd.toml` into a `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name(CONFIG_FILE_STEM).required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Returns the built-in defaults without consulting the environment.
    ///
    /// ## Errors
    /// Returns an error if the defaults fail to deserialize.
    pub fn defaults() -> Result<Self> {
        Ok(Self::builder()?.build()?.try_deserialize::<Settings>()?)
    }

    fn builder() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("input.format", InputFormat::Ldif.as_str())?
            .set_default("input.attribute", SECURITY_DESCRIPTOR_ATTRIBUTE)?
            .set_default("output.format", OutputFormat::Text.as_str())?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}
