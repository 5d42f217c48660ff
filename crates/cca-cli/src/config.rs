//! Pipeline configuration.
//!
//! Every field has a default reproducing the reference products, so an empty
//! TOML file (or no file at all) yields the standard run. Paths of data
//! products are relative to [`PipelineConfig::data_dir`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

use cca_ingest::{DataSource, DirectorySource, EUROSTAT_API_URL, EurostatClient};
use cca_model::{JoinDefinition, MicrodataDefinition, SeriesDefinition};

/// Where statistical series are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceConfig {
    /// The Eurostat dissemination API.
    Eurostat {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// A directory of previously downloaded `.tsv` or `.csv` datasets.
    Directory { path: PathBuf },
}

fn default_base_url() -> String {
    EUROSTAT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Eurostat {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    /// Builds the data source this configuration describes.
    pub fn build(&self) -> Result<Box<dyn DataSource>> {
        match self {
            Self::Eurostat {
                base_url,
                timeout_secs,
            } => {
                let client =
                    EurostatClient::new(base_url.clone(), Some(Duration::from_secs(*timeout_secs)))
                        .context("create Eurostat client")?;
                Ok(Box::new(client))
            }
            Self::Directory { path } => Ok(Box::new(DirectorySource::new(path.clone()))),
        }
    }
}

/// Complete configuration of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root under which every product path is resolved.
    pub data_dir: PathBuf,
    pub source: SourceConfig,
    /// Series supplying the left-hand measure of the joined product.
    pub left: SeriesDefinition,
    /// Series supplying the right-hand measure of the joined product.
    pub right: SeriesDefinition,
    pub join: JoinDefinition,
    pub microdata: MicrodataDefinition,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            source: SourceConfig::default(),
            left: SeriesDefinition::municipal_waste(),
            right: SeriesDefinition::packaging_recycling(),
            join: JoinDefinition::default(),
            microdata: MicrodataDefinition::default(),
        }
    }
}

impl PipelineConfig {
    /// Reads and validates a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        for series in [&self.left, &self.right] {
            ensure!(
                !series.key_columns.is_empty(),
                "series '{}' declares no key columns",
                series.dataset
            );
            ensure!(
                series.key_columns.contains(&self.join.group_column),
                "series '{}' does not declare the group column '{}' as a key",
                series.dataset,
                self.join.group_column
            );
        }

        let headers = [
            &self.join.group_column,
            &self.join.period_column,
            &self.left.measure,
            &self.right.measure,
        ];
        for (idx, name) in headers.iter().enumerate() {
            ensure!(!name.trim().is_empty(), "output column names must not be empty");
            if headers[..idx].contains(name) {
                bail!("output column '{name}' is used more than once in the joined product");
            }
        }

        ensure!(
            self.microdata.separator.is_ascii(),
            "microdata separator '{}' is not an ASCII character",
            self.microdata.separator
        );
        ensure!(
            !self.microdata.indicators.prefix.is_empty(),
            "indicator prefix must not be empty"
        );
        Ok(())
    }

    /// Resolves a product path against the data directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }
}
