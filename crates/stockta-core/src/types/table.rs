//! Price series table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::columns::{names, BollingerColumns, Column, MacdColumns, MovingAverageColumns};
use super::snapshot::Snapshot;
use crate::error::IndicatorError;

/// A loaded column carried through verbatim (e.g. Open, Volume).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,
    pub values: Vec<String>,
}

/// Ordered price rows plus the indicator columns derived from them.
///
/// `Date` and `Adj Close` are always present. Every derived group is an
/// `Option`, so code that needs e.g. Bollinger bands has to handle their
/// absence explicitly instead of looking a column up by name.
///
/// Deserialization goes through the same length checks as the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRecord")]
pub struct PriceTable {
    header: Vec<String>,
    dates: Vec<NaiveDateTime>,
    adj_close: Vec<f64>,
    passthrough: Vec<RawColumn>,
    moving_averages: Option<MovingAverageColumns>,
    rsi: Option<Column>,
    macd: Option<MacdColumns>,
    bollinger: Option<BollingerColumns>,
}

impl PriceTable {
    /// Create a table holding only `Date` and `Adj Close`.
    pub fn new(dates: Vec<NaiveDateTime>, adj_close: Vec<f64>) -> Result<Self, IndicatorError> {
        let header = vec![names::DATE.to_string(), names::ADJ_CLOSE.to_string()];
        Self::from_parts(header, dates, adj_close, Vec::new())
    }

    /// Create a table from loaded columns, keeping `header` as the file column order.
    pub fn from_parts(
        header: Vec<String>,
        dates: Vec<NaiveDateTime>,
        adj_close: Vec<f64>,
        passthrough: Vec<RawColumn>,
    ) -> Result<Self, IndicatorError> {
        let expected = dates.len();
        check_len(names::ADJ_CLOSE, expected, adj_close.len())?;
        for column in &passthrough {
            check_len(&column.name, expected, column.values.len())?;
        }

        Ok(Self {
            header,
            dates,
            adj_close,
            passthrough,
            moving_averages: None,
            rsi: None,
            macd: None,
            bollinger: None,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDateTime] {
        &self.dates
    }

    pub fn adj_close(&self) -> &[f64] {
        &self.adj_close
    }

    /// Loaded columns other than `Date` and `Adj Close`, in header order.
    pub fn passthrough(&self) -> &[RawColumn] {
        &self.passthrough
    }

    /// Look up a passthrough column by its header name.
    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.passthrough.iter().find(|c| c.name == name)
    }

    pub fn moving_averages(&self) -> Option<&MovingAverageColumns> {
        self.moving_averages.as_ref()
    }

    pub fn rsi(&self) -> Option<&Column> {
        self.rsi.as_ref()
    }

    pub fn macd(&self) -> Option<&MacdColumns> {
        self.macd.as_ref()
    }

    pub fn bollinger(&self) -> Option<&BollingerColumns> {
        self.bollinger.as_ref()
    }

    /// Attach (or replace) the moving average columns.
    pub fn set_moving_averages(&mut self, columns: MovingAverageColumns) -> Result<(), IndicatorError> {
        check_len(names::MA_SHORT, self.len(), columns.short.len())?;
        check_len(names::MA_LONG, self.len(), columns.long.len())?;
        self.moving_averages = Some(columns);
        Ok(())
    }

    /// Attach (or replace) the RSI column.
    pub fn set_rsi(&mut self, rsi: Column) -> Result<(), IndicatorError> {
        check_len(names::RSI, self.len(), rsi.len())?;
        self.rsi = Some(rsi);
        Ok(())
    }

    /// Attach (or replace) the MACD columns.
    pub fn set_macd(&mut self, columns: MacdColumns) -> Result<(), IndicatorError> {
        check_len(names::MACD, self.len(), columns.macd.len())?;
        check_len(names::MACD_SIGNAL, self.len(), columns.signal.len())?;
        check_len(names::MACD_HIST, self.len(), columns.histogram.len())?;
        self.macd = Some(columns);
        Ok(())
    }

    /// Attach (or replace) the Bollinger band columns.
    pub fn set_bollinger(&mut self, columns: BollingerColumns) -> Result<(), IndicatorError> {
        check_len(names::BOLLINGER_HIGH, self.len(), columns.high.len())?;
        check_len(names::BOLLINGER_MID, self.len(), columns.middle.len())?;
        check_len(names::BOLLINGER_LOW, self.len(), columns.low.len())?;
        self.bollinger = Some(columns);
        Ok(())
    }

    /// File header followed by the derived columns currently present.
    pub fn column_names(&self) -> Vec<String> {
        let mut out = self.header.clone();
        if self.moving_averages.is_some() {
            out.extend([names::MA_SHORT, names::MA_LONG].map(String::from));
        }
        if self.rsi.is_some() {
            out.push(names::RSI.to_string());
        }
        if self.macd.is_some() {
            out.extend([names::MACD, names::MACD_SIGNAL, names::MACD_HIST].map(String::from));
        }
        if self.bollinger.is_some() {
            out.extend(
                [names::BOLLINGER_HIGH, names::BOLLINGER_MID, names::BOLLINGER_LOW].map(String::from),
            );
        }
        out
    }

    /// Whether dates never decrease from one row to the next.
    pub fn is_chronological(&self) -> bool {
        self.dates.windows(2).all(|w| w[0] <= w[1])
    }

    /// Values of the last row, or `None` for an empty table.
    pub fn latest(&self) -> Option<Snapshot> {
        let last = self.len().checked_sub(1)?;
        let at = |column: &Column| column[last];

        Some(Snapshot {
            date: self.dates[last],
            adj_close: self.adj_close[last],
            ma_short: self.moving_averages.as_ref().and_then(|m| at(&m.short)),
            ma_long: self.moving_averages.as_ref().and_then(|m| at(&m.long)),
            rsi: self.rsi.as_ref().and_then(at),
            macd: self.macd.as_ref().and_then(|m| at(&m.macd)),
            macd_signal: self.macd.as_ref().and_then(|m| at(&m.signal)),
            macd_hist: self.macd.as_ref().and_then(|m| at(&m.histogram)),
            bollinger_high: self.bollinger.as_ref().and_then(|b| at(&b.high)),
            bollinger_mid: self.bollinger.as_ref().and_then(|b| at(&b.middle)),
            bollinger_low: self.bollinger.as_ref().and_then(|b| at(&b.low)),
        })
    }
}

/// Unchecked serialized form of [`PriceTable`].
#[derive(Deserialize)]
struct TableRecord {
    header: Vec<String>,
    dates: Vec<NaiveDateTime>,
    adj_close: Vec<f64>,
    passthrough: Vec<RawColumn>,
    moving_averages: Option<MovingAverageColumns>,
    rsi: Option<Column>,
    macd: Option<MacdColumns>,
    bollinger: Option<BollingerColumns>,
}

impl TryFrom<TableRecord> for PriceTable {
    type Error = IndicatorError;

    fn try_from(record: TableRecord) -> Result<Self, Self::Error> {
        let mut table =
            PriceTable::from_parts(record.header, record.dates, record.adj_close, record.passthrough)?;
        if let Some(columns) = record.moving_averages {
            table.set_moving_averages(columns)?;
        }
        if let Some(rsi) = record.rsi {
            table.set_rsi(rsi)?;
        }
        if let Some(columns) = record.macd {
            table.set_macd(columns)?;
        }
        if let Some(columns) = record.bollinger {
            table.set_bollinger(columns)?;
        }
        Ok(table)
    }
}

fn check_len(column: &str, expected: usize, actual: usize) -> Result<(), IndicatorError> {
    if expected != actual {
        return Err(IndicatorError::LengthMismatch {
            column: column.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}
