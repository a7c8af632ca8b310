//! Core traits for stockta.

mod data_source;
mod indicator;

pub use data_source::PriceSource;
pub use indicator::{Indicator, MultiOutputIndicator};
