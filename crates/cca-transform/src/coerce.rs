//! Value coercion for reshaped candidates.

use tracing::debug;

use cca_common::parse_finite_f64;
use cca_model::{CandidateRecord, LongRecord};

/// Records that survived coercion plus the number that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoerceOutcome {
    pub records: Vec<LongRecord>,
    /// Candidates dropped because their value was missing or not a finite
    /// number.
    pub dropped: usize,
}

/// Keeps the candidates whose value parses as a finite number.
///
/// Dropping is the expected way missing observations leave the pipeline, so
/// it is only reported through [`CoerceOutcome::dropped`].
pub fn coerce_values(candidates: Vec<CandidateRecord>) -> CoerceOutcome {
    let total = candidates.len();
    let records: Vec<LongRecord> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let value = candidate.raw_value.as_deref().and_then(parse_finite_f64)?;
            Some(LongRecord {
                dims: candidate.dims,
                period: candidate.period,
                value,
            })
        })
        .collect();
    let dropped = total - records.len();
    if dropped > 0 {
        debug!(total, dropped, "dropped candidates without a numeric value");
    }
    CoerceOutcome { records, dropped }
}
