//! Configuration structures.

use serde::{Deserialize, Serialize};
use stockta_indicators::IndicatorParams;

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub chart: ChartSettings,
}

impl AppConfig {
    /// Check indicator parameters and chart settings.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.indicators.validate()?;
        self.chart.validate()
    }

    /// Render as TOML, e.g. to bootstrap a config file.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stockta".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Figure size and RSI reference lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u16,
    pub height: u16,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

/// Smallest figure that still fits three bordered panels with axes.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 15;

impl ChartSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(SettingsError::Invalid(format!(
                "chart size {}x{} is below the minimum {}x{}",
                self.width, self.height, MIN_WIDTH, MIN_HEIGHT
            )));
        }
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.rsi_oversold)
            || !in_range(self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(SettingsError::Invalid(format!(
                "RSI levels must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        Ok(())
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 140,
            height: 40,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
        }
    }
}
