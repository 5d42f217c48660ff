//! Upstream data sources for statistical series.

use std::path::PathBuf;

use tracing::{debug, info};

use cca_model::{SeriesDefinition, WideTable};

use crate::csv::{RawTable, read_delimited};
use crate::error::{IngestError, Result};
use crate::eurostat::parse_eurostat_tsv;

/// Provider of named datasets in wide layout.
pub trait DataSource {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches `dataset` as a raw wide table.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::SourceUnavailable`] when the dataset cannot be
    /// obtained at all.
    fn fetch(&self, dataset: &str) -> Result<RawTable>;
}

/// Reads datasets previously downloaded into a directory.
///
/// `{dataset}.tsv` files use the Eurostat TSV layout; `{dataset}.csv` files
/// are plain comma-separated wide tables. The TSV file wins when both exist.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    fn fetch(&self, dataset: &str) -> Result<RawTable> {
        let tsv_path = self.dir.join(format!("{dataset}.tsv"));
        if tsv_path.is_file() {
            debug!(path = %tsv_path.display(), "reading Eurostat TSV");
            let text = std::fs::read_to_string(&tsv_path).map_err(|e| IngestError::FileRead {
                path: tsv_path.clone(),
                source: e,
            })?;
            return parse_eurostat_tsv(dataset, &text);
        }

        let csv_path = self.dir.join(format!("{dataset}.csv"));
        if csv_path.is_file() {
            debug!(path = %csv_path.display(), "reading wide CSV");
            return read_delimited(&csv_path, ',');
        }

        Err(IngestError::SourceUnavailable {
            dataset: dataset.to_string(),
            reason: format!(
                "neither {dataset}.tsv nor {dataset}.csv exists in {}",
                self.dir.display()
            ),
        })
    }
}

/// Fetches the dataset of `definition` and validates it as a wide table.
///
/// Every declared key column and every filtered column must be present.
pub fn fetch_wide_table(
    source: &dyn DataSource,
    definition: &SeriesDefinition,
) -> Result<WideTable> {
    let raw = source.fetch(&definition.dataset)?;
    let schema_error = |source| IngestError::Schema {
        name: definition.dataset.clone(),
        source,
    };

    if let Some(column) = definition
        .filter
        .columns()
        .find(|column| !definition.key_columns.iter().any(|key| key == column))
    {
        return Err(schema_error(cca_model::ModelError::MissingKeyColumn {
            column: column.to_string(),
        }));
    }

    let key_columns = definition.key_columns.as_slice();
    let table =
        WideTable::from_text_rows(&raw.header, raw.rows, key_columns).map_err(schema_error)?;

    if !table.ignored_columns().is_empty() {
        debug!(
            dataset = %definition.dataset,
            columns = ?table.ignored_columns(),
            "dropping columns that are neither keys nor periods"
        );
    }
    info!(
        source = source.name(),
        dataset = %definition.dataset,
        rows = table.height(),
        periods = table.periods().len(),
        "dataset loaded"
    );
    Ok(table)
}
