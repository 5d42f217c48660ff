//! Shared utilities for the circular analytics crates.
//!
//! Conversion helpers between Polars `AnyValue` cells and the plain text and
//! numeric values the tidying pipeline works with.

pub mod values;

pub use values::{
    any_to_optional_string, any_to_string, format_numeric, parse_decimal, parse_finite_f64,
    parse_period,
};
