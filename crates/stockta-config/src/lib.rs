//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, ChartSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use stockta_core::error::IndicatorError;
use thiserror::Error;

/// Errors raised while checking or serializing a loaded configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid indicator parameters: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Invalid setting: {0}")]
    Invalid(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// Environment variables use the `STOCKTA__` prefix with `__` between
/// keys, e.g. `STOCKTA__INDICATORS__RSI__PERIOD=9`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("STOCKTA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
