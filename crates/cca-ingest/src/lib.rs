//! Data ingestion for the circular analytics pipeline.
//!
//! This crate turns upstream inputs into the validated tables of
//! `cca-model`:
//!
//! - **Delimited files**: read through Polars with every column as text
//! - **Eurostat datasets**: the SDMX TSV layout, fetched over HTTP or read
//!   from a local directory
//! - **Survey microdata**: an optional `;`-delimited file
//!
//! # Example
//!
//! ```ignore
//! use cca_ingest::{DirectorySource, fetch_wide_table};
//! use cca_model::SeriesDefinition;
//!
//! let source = DirectorySource::new("downloads");
//! let table = fetch_wide_table(&source, &SeriesDefinition::municipal_waste())?;
//! ```

mod csv;
mod error;
mod eurostat;
mod microdata;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === Delimited Files ===
pub use csv::{RawTable, normalize_header, read_delimited};

// === Data Sources ===
pub use eurostat::{EUROSTAT_API_URL, EurostatClient, parse_eurostat_tsv};
pub use source::{DataSource, DirectorySource, fetch_wide_table};

// === Microdata ===
pub use microdata::load_microdata;
