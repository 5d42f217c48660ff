//! Output of tidy data products.
//!
//! Records are first converted into an [`OutputTable`] (fixed header, text
//! cells, `None` for missing values) and then written as comma-separated
//! files with [`write_table`].

pub mod error;
pub mod table;
pub mod writer;

pub use error::{OutputError, Result};
pub use table::{OutputTable, category_table, indicator_table, joined_table, series_table};
pub use writer::{to_csv_bytes, write_table};
