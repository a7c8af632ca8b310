//! Core data types for stockta.

mod columns;
mod snapshot;
mod table;

pub use columns::{align, names, BollingerColumns, Column, MacdColumns, MovingAverageColumns};
pub use snapshot::Snapshot;
pub use table::{PriceTable, RawColumn};
