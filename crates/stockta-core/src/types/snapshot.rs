//! Latest-row view of a price table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator readings on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: NaiveDateTime,
    pub adj_close: f64,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub bollinger_high: Option<f64>,
    pub bollinger_mid: Option<f64>,
    pub bollinger_low: Option<f64>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(value: Option<f64>) -> String {
            value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
        }

        writeln!(f, "Date:           {}", self.date.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(f, "Adj Close:      {:.4}", self.adj_close)?;
        writeln!(f, "MA_Short:       {}", show(self.ma_short))?;
        writeln!(f, "MA_Long:        {}", show(self.ma_long))?;
        writeln!(f, "RSI:            {}", show(self.rsi))?;
        writeln!(f, "MACD:           {}", show(self.macd))?;
        writeln!(f, "MACD_Signal:    {}", show(self.macd_signal))?;
        writeln!(f, "MACD_Hist:      {}", show(self.macd_hist))?;
        writeln!(f, "Bollinger_High: {}", show(self.bollinger_high))?;
        writeln!(f, "Bollinger_Mid:  {}", show(self.bollinger_mid))?;
        write!(f, "Bollinger_Low:  {}", show(self.bollinger_low))
    }
}
