//! Technical indicators and price table calculators.
//!
//! This crate provides:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Standard Deviation, Bollinger Bands)
//! - Calculators that attach indicator columns to a [`PriceTable`]
//!
//! [`PriceTable`]: stockta_core::PriceTable

pub mod calculators;
pub mod momentum;
pub mod moving_average;
pub mod params;
pub mod volatility;

pub use calculators::{add_bollinger_bands, add_macd, add_moving_averages, add_rsi, apply_all};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use params::{BollingerParams, IndicatorParams, MacdParams, MovingAverageParams, RsiParams};
pub use volatility::{BollingerBands, BollingerOutput, StdDev};
