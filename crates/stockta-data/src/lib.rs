//! Price data loading.

mod csv_source;

pub use csv_source::{parse_date, CsvSource};

use std::path::Path;
use stockta_core::error::DataError;
use stockta_core::types::PriceTable;

/// Load a price table from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<PriceTable, DataError> {
    let source = CsvSource::new(path)?;
    source.load()
}
