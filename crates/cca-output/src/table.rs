//! Output table model and conversions from pipeline records.

use cca_common::format_numeric;
use cca_model::{CategoryShare, IndicatorShare, JoinedRecord, SeriesPoint};

/// A fully materialised output table.
///
/// Cells are already formatted as text; `None` is written as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl OutputTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of data rows, excluding the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// `group, period, measure` rows of one filtered series.
pub fn series_table(
    points: &[SeriesPoint],
    group_column: &str,
    period_column: &str,
    measure: &str,
) -> OutputTable {
    let mut table = OutputTable::new(headers(&[group_column, period_column, measure]));
    for point in points {
        table.push_row(vec![
            Some(point.group.clone()),
            Some(point.period.to_string()),
            Some(format_numeric(point.value)),
        ]);
    }
    table
}

/// `group, period, left, right` rows of an outer join; absent sides stay empty.
pub fn joined_table(
    records: &[JoinedRecord],
    group_column: &str,
    period_column: &str,
    left_measure: &str,
    right_measure: &str,
) -> OutputTable {
    let mut table = OutputTable::new(headers(&[
        group_column,
        period_column,
        left_measure,
        right_measure,
    ]));
    for record in records {
        table.push_row(vec![
            Some(record.group.clone()),
            Some(record.period.to_string()),
            record.left.map(format_numeric),
            record.right.map(format_numeric),
        ]);
    }
    table
}

/// `column, pct` rows of a category share product.
pub fn category_table(shares: &[CategoryShare], column: &str) -> OutputTable {
    let mut table = OutputTable::new(headers(&[column, "pct"]));
    for share in shares {
        table.push_row(vec![
            Some(share.category.clone()),
            Some(format_numeric(share.pct)),
        ]);
    }
    table
}

/// `label, pct` rows of an indicator share product.
pub fn indicator_table(shares: &[IndicatorShare], label: &str) -> OutputTable {
    let mut table = OutputTable::new(headers(&[label, "pct"]));
    for share in shares {
        table.push_row(vec![
            Some(share.indicator.clone()),
            Some(format_numeric(share.pct)),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_table_keeps_missing_sides_empty() {
        let records = vec![
            JoinedRecord {
                group: "ES".to_string(),
                period: 2020,
                left: Some(10.0),
                right: Some(5.0),
            },
            JoinedRecord {
                group: "ES".to_string(),
                period: 2021,
                left: None,
                right: Some(6.0),
            },
        ];

        let table = joined_table(
            &records,
            "geo",
            "year",
            "residuos_kg_hab",
            "reciclaje_envases_pct",
        );
        assert_eq!(
            table.headers(),
            &["geo", "year", "residuos_kg_hab", "reciclaje_envases_pct"]
        );
        assert_eq!(
            table.rows()[1],
            vec![
                Some("ES".to_string()),
                Some("2021".to_string()),
                None,
                Some("6".to_string())
            ]
        );
    }

    #[test]
    fn test_zero_is_not_missing() {
        let points = vec![SeriesPoint::new("ES", 2020, 0.0)];
        let table = series_table(&points, "geo", "year", "residuos_kg_hab");
        assert_eq!(table.rows()[0][2].as_deref(), Some("0"));
    }

    #[test]
    fn test_category_table_formats_shares() {
        let shares = vec![
            CategoryShare {
                category: "A".to_string(),
                pct: 66.7,
            },
            CategoryShare {
                category: "B".to_string(),
                pct: 33.3,
            },
        ];
        let table = category_table(&shares, "respalim");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0][1].as_deref(), Some("66.7"));
    }
}
