//! Error types for stockta.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification shared by every error in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ParseError,
    MissingColumn,
    InvalidParameter,
    Io,
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum StockError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl StockError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StockError::Data(e) => e.kind(),
            StockError::Indicator(e) => e.kind(),
            StockError::Render(e) => e.kind(),
        }
    }
}

/// Data loading errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Parse error at row {row}, column '{column}': {message}")]
    ParseError {
        row: usize,
        column: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::NotFound(_) => ErrorKind::NotFound,
            DataError::MissingColumn(_) => ErrorKind::MissingColumn,
            DataError::ParseError { .. } => ErrorKind::ParseError,
            DataError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Column '{column}' has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl IndicatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndicatorError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            // A misaligned column is a missing column as far as callers are concerned.
            IndicatorError::LengthMismatch { .. } => ErrorKind::MissingColumn,
        }
    }
}

/// Chart rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::MissingColumn(_) => ErrorKind::MissingColumn,
            RenderError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for stockta operations.
pub type StockResult<T> = Result<T, StockError>;
