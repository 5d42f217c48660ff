//! Tidying transformations.
//!
//! The statistical series run through [`melt`], [`coerce_values`],
//! [`filter_records`] and [`project_series`] before two series are combined
//! with [`outer_join`]. Survey microdata goes through [`resolve_weights`] and
//! then [`category_shares`] or [`indicator_shares`].
//!
//! # Design Principles
//!
//! - **Stateless functions**: every stage takes its input by reference and
//!   returns a fresh result
//! - **Row-level degradation**: unparseable values are dropped and counted,
//!   never raised
//! - **Deterministic output**: joined and aggregated rows have a defined order

mod coerce;
mod error;
mod filter;
mod join;
mod reshape;
mod weighted;

pub use coerce::{CoerceOutcome, coerce_values};
pub use error::{Result, TransformError};
pub use filter::{filter_records, project_series};
pub use join::{JoinOutcome, outer_join};
pub use reshape::melt;
pub use weighted::{
    WeightMode, Weights, category_shares, indicator_columns, indicator_shares, resolve_weights,
};
