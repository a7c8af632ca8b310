//! Derived column groups attached to a [`PriceTable`](super::PriceTable).

use serde::{Deserialize, Serialize};

/// One value per row; `None` marks a warm-up row with no defined value.
pub type Column = Vec<Option<f64>>;

/// Column names as they appear in headers, legends and error messages.
pub mod names {
    pub const DATE: &str = "Date";
    pub const ADJ_CLOSE: &str = "Adj Close";
    pub const MA_SHORT: &str = "MA_Short";
    pub const MA_LONG: &str = "MA_Long";
    pub const RSI: &str = "RSI";
    pub const MACD: &str = "MACD";
    pub const MACD_SIGNAL: &str = "MACD_Signal";
    pub const MACD_HIST: &str = "MACD_Hist";
    pub const BOLLINGER_HIGH: &str = "Bollinger_High";
    pub const BOLLINGER_MID: &str = "Bollinger_Mid";
    pub const BOLLINGER_LOW: &str = "Bollinger_Low";
}

/// Left-pad indicator output so it lines up with the table rows.
///
/// Indicators return one value per fully warmed-up row, so the missing
/// prefix is exactly the warm-up period. Output longer than `len` is
/// truncated from the front.
pub fn align(values: &[f64], len: usize) -> Column {
    let skip = values.len().saturating_sub(len);
    let pad = len.saturating_sub(values.len());
    std::iter::repeat(None)
        .take(pad)
        .chain(values[skip..].iter().map(|&v| Some(v)))
        .collect()
}

/// Short and long simple moving averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageColumns {
    pub window_short: usize,
    pub window_long: usize,
    pub short: Column,
    pub long: Column,
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdColumns {
    pub macd: Column,
    pub signal: Column,
    pub histogram: Column,
}

/// Bollinger envelope around a simple moving average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerColumns {
    pub high: Column,
    pub middle: Column,
    pub low: Column,
}
