//! Error types for data ingestion.

use std::path::PathBuf;

use cca_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading source data.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upstream Source Errors ===
    /// The data source cannot provide a required dataset.
    #[error(
        "data source unavailable for dataset '{dataset}': {reason} \
         (check network access, or pass --source-dir with downloaded files)"
    )]
    SourceUnavailable { dataset: String, reason: String },

    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse a delimited file with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A Eurostat TSV payload does not follow the expected layout.
    #[error("malformed Eurostat TSV for '{dataset}' at line {line}: {reason}")]
    TsvFormat {
        dataset: String,
        line: usize,
        reason: String,
    },

    /// The configured field separator is not a single ASCII character.
    #[error("separator '{separator}' is not an ASCII character")]
    InvalidSeparator { separator: char },

    // === Schema Errors ===
    /// Loaded rows do not satisfy the table schema.
    #[error("invalid table '{name}': {source}")]
    Schema {
        name: String,
        #[source]
        source: ModelError,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_mentions_remediation() {
        let err = IngestError::SourceUnavailable {
            dataset: "env_wasmun".to_string(),
            reason: "connection refused".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("env_wasmun"));
        assert!(message.contains("--source-dir"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("geo".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
