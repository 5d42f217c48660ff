//! Delimited file reading.

mod header;
mod reader;

pub use header::normalize_header;
pub use reader::{RawTable, read_delimited};
