//! Records produced while running the pipeline.

use crate::table::Dimensions;

/// A reshaped cell before value coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub dims: Dimensions,
    pub period: i32,
    /// Raw cell text; `None` when the source cell was missing.
    pub raw_value: Option<String>,
}

/// A long-format measurement with a guaranteed finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub dims: Dimensions,
    pub period: i32,
    pub value: f64,
}

/// A filtered measurement reduced to `(group, period, value)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Group identifier, the region code (`geo`) in the reference series.
    pub group: String,
    pub period: i32,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(group: impl Into<String>, period: i32, value: f64) -> Self {
        Self {
            group: group.into(),
            period,
            value,
        }
    }
}

/// One key of an outer join with each side independently present.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub group: String,
    pub period: i32,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

/// Weighted percentage share of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    /// Percentage in `0..=100`.
    pub pct: f64,
}

/// Weighted percentage of respondents selecting one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorShare {
    /// Indicator column name.
    pub indicator: String,
    pub pct: f64,
}
