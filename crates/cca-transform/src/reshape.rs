//! Wide-to-long reshaping.

use cca_model::{CandidateRecord, Dimensions, WideTable};

/// Turns every `(row, period column)` pair of `table` into a candidate
/// record.
///
/// Output is row-major, then period-column order, and always holds
/// `rows x period columns` candidates. A table without period columns
/// yields nothing.
pub fn melt(table: &WideTable) -> Vec<CandidateRecord> {
    let mut candidates = Vec::with_capacity(table.height() * table.periods().len());
    for row in table.rows() {
        let dims = Dimensions::from_pairs(
            table
                .key_columns()
                .iter()
                .map(String::as_str)
                .zip(row.keys.iter().map(String::as_str)),
        );
        for (period, cell) in table.periods().iter().zip(&row.cells) {
            candidates.push(CandidateRecord {
                dims: dims.clone(),
                period: period.period,
                raw_value: cell.clone(),
            });
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]], keys: &[&str]) -> WideTable {
        let header: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| Some(c.to_string()).filter(|c| !c.is_empty()))
                    .collect()
            })
            .collect();
        WideTable::from_text_rows(&header, rows, keys).unwrap()
    }

    #[test]
    fn test_melt_row_major_order() {
        let wide = table(
            &["geo", "2020", "2021"],
            &[&["ES", "1", "2"], &["FR", "3", ""]],
            &["geo"],
        );
        let long = melt(&wide);

        assert_eq!(long.len(), 4);
        let order: Vec<(&str, i32)> = long
            .iter()
            .map(|r| (r.dims.get("geo").unwrap(), r.period))
            .collect();
        assert_eq!(
            order,
            vec![("ES", 2020), ("ES", 2021), ("FR", 2020), ("FR", 2021)]
        );
        assert_eq!(long[3].raw_value, None);
    }

    #[test]
    fn test_melt_keeps_all_key_dimensions() {
        let wide = table(
            &["geo", "unit", "2020"],
            &[&["ES", "PC", "70.1"]],
            &["geo", "unit"],
        );
        let long = melt(&wide);

        assert_eq!(long[0].dims.get("unit"), Some("PC"));
        assert_eq!(long[0].raw_value.as_deref(), Some("70.1"));
    }

    #[test]
    fn test_melt_without_period_columns_is_empty() {
        let wide = table(&["geo", "label"], &[&["ES", "Spain"]], &["geo"]);
        assert!(melt(&wide).is_empty());
    }
}
