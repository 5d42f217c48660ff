//! Weighted percentage aggregates over survey microdata.
//!
//! Two modes share the same weights:
//!
//! - **Category shares**: the categories of one column partition the counted
//!   weight, so shares total 100 up to rounding.
//! - **Indicator shares**: each binary indicator column is measured against
//!   the total weight on its own, so results need not total 100.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use cca_common::{parse_decimal, parse_finite_f64};
use cca_model::{CategoryShare, IndicatorShare, Microdata, RoundingMode};

use crate::error::{Result, TransformError};

/// Percentage points represented by one rounding unit (one decimal place).
const UNITS_PER_POINT: f64 = 10.0;

/// Rounding units in a complete partition (100.0 percent).
const UNITS_TOTAL: i64 = 1000;

/// Where row weights come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightMode {
    /// Weights read from the named column.
    Column(String),
    /// The weight column was absent; every row weighs 1.0.
    Uniform,
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => write!(f, "weighted by {name}"),
            Self::Uniform => f.write_str("uniform"),
        }
    }
}

/// Per-row weights aligned with a microdata table.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    values: Vec<Option<f64>>,
    mode: WeightMode,
}

impl Weights {
    /// Weight 1.0 for each of `rows` rows.
    pub fn uniform(rows: usize) -> Self {
        Self {
            values: vec![Some(1.0); rows],
            mode: WeightMode::Uniform,
        }
    }

    pub fn mode(&self) -> &WeightMode {
        &self.mode
    }

    /// Row weights; `None` where the weight is missing or unparseable.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    fn total(&self) -> f64 {
        self.values.iter().flatten().sum()
    }
}

/// Reads row weights from `weight_column`.
///
/// When the column does not exist every row is weighted equally and a
/// warning is logged; this is a degraded but valid mode.
pub fn resolve_weights(data: &Microdata, weight_column: &str) -> Weights {
    match data.column_values(weight_column) {
        Some(cells) => Weights {
            values: cells
                .into_iter()
                .map(|cell| cell.and_then(parse_decimal))
                .collect(),
            mode: WeightMode::Column(weight_column.to_string()),
        },
        None => {
            warn!(
                weight_column,
                "weight column not found; weighting every row equally"
            );
            Weights::uniform(data.height())
        }
    }
}

/// Computes each observed category's share of the counted weight.
///
/// Rows missing either the category or the weight are left out of both the
/// numerator and the denominator. Shares are rounded to one decimal according
/// to `rounding` and sorted by descending share, then ascending category.
///
/// # Errors
///
/// Returns [`TransformError::ColumnNotFound`] when `column` is absent.
pub fn category_shares(
    data: &Microdata,
    weights: &Weights,
    column: &str,
    rounding: RoundingMode,
) -> Result<Vec<CategoryShare>> {
    let cells = data
        .column_values(column)
        .ok_or_else(|| TransformError::ColumnNotFound {
            column: column.to_string(),
        })?;

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    let mut counted = 0.0;
    for (cell, weight) in cells.iter().zip(weights.values()) {
        let (Some(category), Some(weight)) = (*cell, *weight) else {
            continue;
        };
        *totals.entry(category).or_insert(0.0) += weight;
        counted += weight;
    }

    if counted == 0.0 {
        warn!(column, "no weighted rows to aggregate");
        return Ok(Vec::new());
    }

    let mut shares: Vec<(&str, f64)> = totals
        .into_iter()
        .map(|(category, weight)| (category, weight / counted * 100.0))
        .collect();
    shares.sort_by(|a, b| descending(a.1, b.1).then_with(|| a.0.cmp(b.0)));

    let rounded: Vec<f64> = match rounding {
        RoundingMode::Plain => shares.iter().map(|(_, pct)| round_one_decimal(*pct)).collect(),
        RoundingMode::LargestRemainder => largest_remainder(&shares),
    };

    Ok(shares
        .into_iter()
        .zip(rounded)
        .map(|((category, _), pct)| CategoryShare {
            category: category.to_string(),
            pct,
        })
        .collect())
}

/// Selects the indicator columns: those whose lower-cased name starts with
/// `prefix`, in header order.
pub fn indicator_columns(data: &Microdata, prefix: &str) -> Vec<String> {
    let prefix = prefix.to_lowercase();
    data.columns()
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .cloned()
        .collect()
}

/// Computes, per indicator column, the share of total weight whose cell
/// equals `yes_value`.
///
/// The denominator is the weight of every row with a weight, whatever its
/// indicator cells hold. Results are unrounded and sorted by descending
/// share; ties keep the order of `columns`.
///
/// # Errors
///
/// Returns [`TransformError::ColumnNotFound`] when a listed column is absent.
pub fn indicator_shares(
    data: &Microdata,
    weights: &Weights,
    columns: &[String],
    yes_value: &str,
) -> Result<Vec<IndicatorShare>> {
    let total = weights.total();
    let mut shares = Vec::with_capacity(columns.len());
    for column in columns {
        let cells = data
            .column_values(column)
            .ok_or_else(|| TransformError::ColumnNotFound {
                column: column.clone(),
            })?;
        let selected: f64 = cells
            .iter()
            .zip(weights.values())
            .filter(|(cell, _)| cell.is_some_and(|value| is_yes(value, yes_value)))
            .filter_map(|(_, weight)| *weight)
            .sum();
        shares.push((column, selected));
    }

    if total == 0.0 {
        warn!("no weighted rows to aggregate indicators over");
        return Ok(Vec::new());
    }

    let mut shares: Vec<IndicatorShare> = shares
        .into_iter()
        .map(|(column, selected)| IndicatorShare {
            indicator: column.clone(),
            pct: selected / total * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| descending(a.pct, b.pct));
    Ok(shares)
}

fn is_yes(value: &str, yes_value: &str) -> bool {
    if value == yes_value {
        return true;
    }
    match (parse_finite_f64(value), parse_finite_f64(yes_value)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn round_one_decimal(pct: f64) -> f64 {
    (pct * UNITS_PER_POINT).round_ties_even() / UNITS_PER_POINT
}

/// Rounds shares to one decimal so that they total exactly 100.0.
///
/// Each share is floored to tenths and the missing tenths go to the shares
/// with the largest remainders; ties go to the earlier share.
fn largest_remainder(shares: &[(&str, f64)]) -> Vec<f64> {
    let scaled: Vec<f64> = shares.iter().map(|(_, pct)| pct * UNITS_PER_POINT).collect();
    let mut units: Vec<i64> = scaled.iter().map(|v| v.floor() as i64).collect();
    let missing = UNITS_TOTAL - units.iter().sum::<i64>();

    let mut order: Vec<usize> = (0..scaled.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = scaled[a] - scaled[a].floor();
        let rem_b = scaled[b] - scaled[b].floor();
        descending(rem_a, rem_b).then(a.cmp(&b))
    });
    for &idx in order.iter().take(usize::try_from(missing).unwrap_or(0)) {
        units[idx] += 1;
    }

    units
        .into_iter()
        .map(|u| u as f64 / UNITS_PER_POINT)
        .collect()
}
