//! Price source trait definitions.

use crate::error::DataError;
use crate::types::PriceTable;

/// Trait for historical price sources.
pub trait PriceSource {
    /// Load every row from the source.
    ///
    /// # Returns
    /// A table with rows in source order and no derived columns
    fn load(&self) -> Result<PriceTable, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    struct FixedSource;

    impl PriceSource for FixedSource {
        fn load(&self) -> Result<PriceTable, DataError> {
            let date = NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            Ok(PriceTable::new(vec![date], vec![42.0]).expect("aligned columns"))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_source_loads_table() {
        let source = FixedSource;
        let table = source.load().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.adj_close(), &[42.0]);
        assert_eq!(source.name(), "fixed");
    }
}
