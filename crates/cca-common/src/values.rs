//! Polars `AnyValue` and text value utilities.
//!
//! Source tables are loaded with every column typed as text, so most of the
//! pipeline only needs to turn cells into strings and then parse numbers out
//! of them with explicit rules.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use cca_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("ES")), "ES");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            // Display wraps some string-like values in quotes
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Converts `AnyValue` to a trimmed `String`, returning `None` for nulls and
/// blank cells.
pub fn any_to_optional_string(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a floating-point number without trailing zeros after the decimal
/// point.
///
/// # Examples
///
/// ```
/// use cca_common::format_numeric;
///
/// assert_eq!(format_numeric(464.0), "464");
/// assert_eq!(format_numeric(66.7), "66.7");
/// assert_eq!(format_numeric(100.0), "100");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Parses a measurement cell as a finite `f64`.
///
/// Blank text, `NaN` and infinities are all treated as "not a number".
pub fn parse_finite_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a decimal number, accepting a decimal comma when the dotted form
/// does not parse.
///
/// Survey microdata published with `;` separators frequently uses `,` as the
/// decimal mark.
pub fn parse_decimal(value: &str) -> Option<f64> {
    parse_finite_f64(value).or_else(|| {
        let trimmed = value.trim();
        if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
            parse_finite_f64(&trimmed.replace(',', "."))
        } else {
            None
        }
    })
}

/// Parses a period column label such as `2021`.
///
/// Only labels made entirely of ASCII digits qualify.
pub fn parse_period(label: &str) -> Option<i32> {
    let trimmed = label.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<i32>().ok()
}
