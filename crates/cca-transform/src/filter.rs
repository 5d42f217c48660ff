//! Dimension filtering and series projection.

use cca_model::{FilterSpec, LongRecord, SeriesPoint};

/// Keeps the records whose dimensions satisfy `spec`, in input order.
pub fn filter_records(records: Vec<LongRecord>, spec: &FilterSpec) -> Vec<LongRecord> {
    if spec.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| spec.matches(&record.dims))
        .collect()
}

/// Reduces long records to `(group, period, value)` points.
///
/// Records without a `group_column` dimension have no group and are
/// skipped.
pub fn project_series(records: &[LongRecord], group_column: &str) -> Vec<SeriesPoint> {
    records
        .iter()
        .filter_map(|record| {
            let group = record.dims.get(group_column)?;
            Some(SeriesPoint::new(group, record.period, record.value))
        })
        .collect()
}
