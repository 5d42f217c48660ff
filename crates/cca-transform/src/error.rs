//! Error types for transformations.

use thiserror::Error;

/// Errors raised by transformations that need a specific input column.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// Column not found in the input table.
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },
}

/// Result type for transformations.
pub type Result<T> = std::result::Result<T, TransformError>;
