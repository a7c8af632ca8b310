//! Core types and traits for stockta.
//!
//! This crate provides the foundational building blocks including:
//! - The price series table and its typed derived-column groups
//! - Error types shared by loading, indicator and rendering code
//! - Core traits for indicators and price sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ErrorKind, StockError, StockResult};
pub use types::*;
pub use traits::*;
