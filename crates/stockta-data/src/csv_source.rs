//! CSV price source.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};
use stockta_core::error::DataError;
use stockta_core::traits::PriceSource;
use stockta_core::types::{names, PriceTable, RawColumn};
use tracing::{debug, info, warn};

/// Date formats tried in order before falling back to RFC 3339.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
];

/// CSV file with a header row, a `Date` column and an `Adj Close` column.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Create a new CSV source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every row from the CSV file.
    ///
    /// The reader owns the file handle, so it is closed on every return path.
    pub fn load(&self) -> Result<PriceTable, DataError> {
        debug!(path = %self.path.display(), "Opening CSV");

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(&self.path)
            .map_err(|e| csv_error(0, e))?;

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(0, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let date_idx = find_column(&header, names::DATE)?;
        let price_idx = find_column(&header, names::ADJ_CLOSE)?;

        let mut passthrough: Vec<(usize, RawColumn)> = header
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_idx && *i != price_idx)
            .map(|(i, name)| {
                (
                    i,
                    RawColumn {
                        name: name.clone(),
                        values: Vec::new(),
                    },
                )
            })
            .collect();

        let mut dates = Vec::new();
        let mut adj_close = Vec::new();
        let mut record = StringRecord::new();
        let mut row = 0;

        while reader.read_record(&mut record).map_err(|e| csv_error(row + 1, e))? {
            row += 1;

            dates.push(parse_date(row, &record[date_idx])?);
            adj_close.push(parse_price(row, &record[price_idx])?);
            for (idx, column) in passthrough.iter_mut() {
                column.values.push(record[*idx].to_string());
            }
        }

        let passthrough = passthrough.into_iter().map(|(_, column)| column).collect();
        let table = PriceTable::from_parts(header, dates, adj_close, passthrough)
            .map_err(|e| DataError::ParseError {
                row,
                column: names::ADJ_CLOSE.to_string(),
                message: e.to_string(),
            })?;

        if !table.is_chronological() {
            warn!(path = %self.path.display(), "Dates are not in ascending order");
        }
        info!(path = %self.path.display(), rows = table.len(), "Loaded price data");

        Ok(table)
    }
}

impl PriceSource for CsvSource {
    fn load(&self) -> Result<PriceTable, DataError> {
        CsvSource::load(self)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

fn find_column(header: &[String], name: &str) -> Result<usize, DataError> {
    header
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

fn csv_error(row: usize, err: csv::Error) -> DataError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => DataError::Io(io),
        _ => DataError::ParseError {
            row,
            column: String::new(),
            message,
        },
    }
}

/// Parse a `Date` cell in any of the supported formats.
pub fn parse_date(row: usize, raw: &str) -> Result<NaiveDateTime, DataError> {
    let value = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return Ok(d.and_time(NaiveTime::default()));
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    Err(DataError::ParseError {
        row,
        column: names::DATE.to_string(),
        message: format!("could not parse date '{}'", raw),
    })
}

fn parse_price(row: usize, raw: &str) -> Result<f64, DataError> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(DataError::ParseError {
            row,
            column: names::ADJ_CLOSE.to_string(),
            message: format!("'{}' is not a finite number", raw),
        }),
    }
}
