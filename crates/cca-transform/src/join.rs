//! Full outer join of two series on `(group, period)`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::warn;

use cca_model::{JoinedRecord, SeriesPoint};

/// Joined rows plus duplicate-key diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinOutcome {
    /// One row per distinct key, sorted by `(group, period)`.
    pub records: Vec<JoinedRecord>,
    /// Points discarded because their key already appeared on the same side.
    pub duplicates: usize,
}

/// Joins two series so that every key of either side appears exactly once.
///
/// A key present on one side only carries `None` for the other side. When a
/// side repeats a key, the first point wins.
pub fn outer_join(left: &[SeriesPoint], right: &[SeriesPoint]) -> JoinOutcome {
    let mut rows: BTreeMap<(&str, i32), (Option<f64>, Option<f64>)> = BTreeMap::new();
    let mut duplicates = 0usize;

    for point in left {
        match rows.entry((point.group.as_str(), point.period)) {
            Entry::Vacant(slot) => {
                slot.insert((Some(point.value), None));
            }
            Entry::Occupied(_) => duplicates += 1,
        }
    }
    for point in right {
        let slot = rows
            .entry((point.group.as_str(), point.period))
            .or_insert((None, None));
        if slot.1.is_some() {
            duplicates += 1;
        } else {
            slot.1 = Some(point.value);
        }
    }

    if duplicates > 0 {
        warn!(duplicates, "series contain repeated (group, period) keys; kept first");
    }

    let records = rows
        .into_iter()
        .map(|((group, period), (left, right))| JoinedRecord {
            group: group.to_string(),
            period,
            left,
            right,
        })
        .collect();
    JoinOutcome {
        records,
        duplicates,
    }
}
