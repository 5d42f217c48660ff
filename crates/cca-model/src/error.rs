//! Error types for table construction.

use thiserror::Error;

/// Errors raised when an ingested table does not satisfy its schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A declared key column is not present in the table header.
    #[error("key column '{column}' not found in table")]
    MissingKeyColumn { column: String },

    /// The same column name appears more than once in a header.
    #[error("duplicate column '{column}' in table header")]
    DuplicateColumn { column: String },

    /// A data row has a different number of cells than the header.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
