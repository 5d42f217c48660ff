//! Delimited file reading through Polars.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use cca_common::any_to_optional_string;

use crate::error::{IngestError, Result};

use super::header::normalize_header;

/// Header plus text rows, the common shape of every loaded source.
///
/// Blank cells are `None`; present cells are trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Converts a Polars DataFrame into text rows.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| normalize_header(name.as_str()))
            .collect();
        let columns = df.get_columns();
        let mut rows = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let mut row = Vec::with_capacity(columns.len());
            for column in columns {
                row.push(any_to_optional_string(column.get(idx)?));
            }
            rows.push(row);
        }
        Ok(Self { header, rows })
    }
}

/// Reads a delimited text file with a header row.
///
/// Every column is loaded as text so that codes such as `01` keep their
/// spelling and numeric parsing stays under the pipeline's control.
pub fn read_delimited(path: &Path, separator: char) -> Result<RawTable> {
    let separator = u8::try_from(separator)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(IngestError::InvalidSeparator { separator })?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read delimited file"
    );
    RawTable::from_dataframe(&df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_delimited_comma() {
        let file = create_temp_csv("geo,unit,2020\nES,KG_HAB,464\nFR,KG_HAB,\n");
        let table = read_delimited(file.path(), ',').unwrap();

        assert_eq!(table.header, vec!["geo", "unit", "2020"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2].as_deref(), Some("464"));
        assert_eq!(table.rows[1][2], None);
    }

    #[test]
    fn test_read_delimited_semicolon_keeps_codes_as_text() {
        let file = create_temp_csv("respalim;fep\n01;1,5\n02;2\n");
        let table = read_delimited(file.path(), ';').unwrap();

        assert_eq!(table.header, vec!["respalim", "fep"]);
        assert_eq!(table.rows[0][0].as_deref(), Some("01"));
        assert_eq!(table.rows[0][1].as_deref(), Some("1,5"));
    }

    #[test]
    fn test_read_delimited_normalizes_time_axis_header() {
        let file = create_temp_csv("unit,geo\\TIME_PERIOD,2021\nPC,ES,70.1\n");
        let table = read_delimited(file.path(), ',').unwrap();

        assert_eq!(table.header, vec!["unit", "geo", "2021"]);
    }

    #[test]
    fn test_read_delimited_rejects_non_ascii_separator() {
        let file = create_temp_csv("a\n1\n");
        let result = read_delimited(file.path(), '§');

        assert!(matches!(
            result,
            Err(IngestError::InvalidSeparator { separator: '§' })
        ));
    }
}
