//! Ingested tables.
//!
//! Both table types are validated once, when they are built from the raw
//! header and text cells of a source file. Downstream stages rely on the
//! schema checks performed here instead of re-checking column presence.

use std::collections::BTreeSet;

use cca_common::parse_period;

use crate::error::{ModelError, Result};

/// Ordered mapping from dimension column name to category code.
///
/// Order follows the key column order of the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dimensions(Vec<(String, String)>);

impl Dimensions {
    /// Builds dimensions from `(column, code)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the code recorded for `column`, if the dimension exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, code)| code.as_str())
    }

    /// Iterates `(column, code)` pairs in key column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A period column of a wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodColumn {
    /// Column label as it appeared in the source header.
    pub label: String,
    /// Parsed period (a year in the reference datasets).
    pub period: i32,
}

/// One row of a wide table: key codes plus one cell per period column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRow {
    /// Codes aligned with [`WideTable::key_columns`].
    pub keys: Vec<String>,
    /// Raw measurement text aligned with [`WideTable::periods`].
    pub cells: Vec<Option<String>>,
}

/// A dimension-keyed table with one column per period.
///
/// Every column is either a declared key column or an integer period. Source
/// columns that are neither are dropped at construction and reported through
/// [`WideTable::ignored_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable {
    key_columns: Vec<String>,
    periods: Vec<PeriodColumn>,
    rows: Vec<WideRow>,
    ignored_columns: Vec<String>,
}

impl WideTable {
    /// Builds a wide table from a header and text rows.
    ///
    /// Every name in `key_columns` must be present in `header`. A header
    /// column is a period column when its label is made of digits only.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingKeyColumn`] when a declared key column is
    /// absent, [`ModelError::DuplicateColumn`] for repeated header names and
    /// [`ModelError::RowWidth`] when a row does not match the header width.
    pub fn from_text_rows<S: AsRef<str>>(
        header: &[String],
        rows: Vec<Vec<Option<String>>>,
        key_columns: &[S],
    ) -> Result<Self> {
        check_unique(header)?;

        let mut key_indices = Vec::with_capacity(key_columns.len());
        for key in key_columns {
            let key = key.as_ref();
            let idx = header
                .iter()
                .position(|name| name == key)
                .ok_or_else(|| ModelError::MissingKeyColumn {
                    column: key.to_string(),
                })?;
            key_indices.push(idx);
        }

        let mut period_indices = Vec::new();
        let mut periods = Vec::new();
        let mut ignored_columns = Vec::new();
        for (idx, name) in header.iter().enumerate() {
            if key_indices.contains(&idx) {
                continue;
            }
            match parse_period(name) {
                Some(period) => {
                    period_indices.push(idx);
                    periods.push(PeriodColumn {
                        label: name.clone(),
                        period,
                    });
                }
                None => ignored_columns.push(name.clone()),
            }
        }

        let mut wide_rows = Vec::with_capacity(rows.len());
        for (row_idx, mut row) in rows.into_iter().enumerate() {
            if row.len() != header.len() {
                return Err(ModelError::RowWidth {
                    row: row_idx,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            let keys = key_indices
                .iter()
                .map(|&idx| row[idx].clone().unwrap_or_default())
                .collect();
            let cells = period_indices
                .iter()
                .map(|&idx| row[idx].take())
                .collect();
            wide_rows.push(WideRow { keys, cells });
        }

        Ok(Self {
            key_columns: key_columns.iter().map(|k| k.as_ref().to_string()).collect(),
            periods,
            rows: wide_rows,
            ignored_columns,
        })
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn periods(&self) -> &[PeriodColumn] {
        &self.periods
    }

    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    /// Source columns that were neither key nor period columns.
    pub fn ignored_columns(&self) -> &[String] {
        &self.ignored_columns
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Survey microdata: one row per respondent, every cell kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Microdata {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Microdata {
    /// Builds microdata from a header and text rows.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateColumn`] or [`ModelError::RowWidth`]
    /// when the rows do not fit the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        check_unique(&columns)?;
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(ModelError::RowWidth {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Returns the cells of `name` in row order, or `None` if the column is
    /// absent. Blank cells are `None`.
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| {
                    row[idx]
                        .as_deref()
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                })
                .collect(),
        )
    }
}

fn check_unique(header: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for name in header {
        if !seen.insert(name.as_str()) {
            return Err(ModelError::DuplicateColumn {
                column: name.clone(),
            });
        }
    }
    Ok(())
}
