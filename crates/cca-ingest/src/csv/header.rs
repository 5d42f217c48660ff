//! Header normalization.

/// Normalizes a column header.
///
/// Trims whitespace and a leading UTF-8 BOM. Eurostat exports label the
/// last key column together with the time axis (`geo\TIME_PERIOD`); only the
/// part before the backslash names the column.
pub fn normalize_header(value: &str) -> String {
    let value = value.trim_start_matches('\u{feff}').trim();
    match value.split_once('\\') {
        Some((name, _)) => name.trim().to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header_trims() {
        assert_eq!(normalize_header("  2020 "), "2020");
        assert_eq!(normalize_header("unit"), "unit");
    }

    #[test]
    fn test_normalize_header_time_axis_suffix() {
        assert_eq!(normalize_header("geo\\TIME_PERIOD"), "geo");
        assert_eq!(normalize_header("geo\\time"), "geo");
    }

    #[test]
    fn test_normalize_header_bom() {
        assert_eq!(normalize_header("\u{feff}id"), "id");
    }
}
