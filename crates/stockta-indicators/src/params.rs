//! Calculator parameters.

use serde::{Deserialize, Serialize};
use stockta_core::error::IndicatorError;

/// Largest accepted window. Keeps derived periods such as `slow + signal`
/// far from `usize` overflow.
pub const MAX_WINDOW: usize = 100_000;

/// Windows for the short and long simple moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingAverageParams {
    pub window_short: usize,
    pub window_long: usize,
}

impl Default for MovingAverageParams {
    fn default() -> Self {
        Self {
            window_short: 20,
            window_long: 50,
        }
    }
}

impl MovingAverageParams {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        positive("window_short", self.window_short)?;
        positive("window_long", self.window_long)
    }
}

/// RSI look-back period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl RsiParams {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        positive("period", self.period)
    }
}

/// MACD fast, slow and signal EMA periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdParams {
    /// `fast` must be strictly less than `slow`; inverted periods are rejected
    /// rather than silently swapped.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        positive("fast", self.fast)?;
        positive("slow", self.slow)?;
        positive("signal", self.signal)?;
        if self.fast >= self.slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "fast ({}) must be less than slow ({})",
                self.fast, self.slow
            )));
        }
        Ok(())
    }
}

/// Bollinger band window and width in standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerParams {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

impl BollingerParams {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.period < 2 {
            return Err(IndicatorError::InvalidParameter(format!(
                "period must be at least 2, got {}",
                self.period
            )));
        }
        positive("period", self.period)?;
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(IndicatorError::InvalidParameter(format!(
                "std_dev must be a positive number, got {}",
                self.std_dev
            )));
        }
        Ok(())
    }
}

/// Parameters for every calculator, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub moving_average: MovingAverageParams,
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub bollinger: BollingerParams,
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), IndicatorError> {
        self.moving_average.validate()?;
        self.rsi.validate()?;
        self.macd.validate()?;
        self.bollinger.validate()
    }
}

fn positive(name: &str, value: usize) -> Result<(), IndicatorError> {
    if value == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "{} must be a positive integer",
            name
        )));
    }
    if value > MAX_WINDOW {
        return Err(IndicatorError::InvalidParameter(format!(
            "{} must be at most {}, got {}",
            name, MAX_WINDOW, value
        )));
    }
    Ok(())
}
