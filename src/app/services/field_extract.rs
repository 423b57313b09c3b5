//! Fixed-column field extraction and typed parsing
//!
//! Shared by every text block parser: pull a column range out of a line,
//! then parse it as an integer or float with blank-as-null semantics. Lines
//! shorter than a requested range yield the available prefix (possibly
//! empty) rather than an error, matching how fixed-width files drop
//! trailing blanks.

use std::ops::Range;

use crate::error::{RegistryError, Result};

/// Extract the raw substring for a column range, clamped to the line length.
///
/// No trimming is applied; callers get the column exactly as written.
pub fn extract(line: &str, range: Range<usize>) -> &str {
    let len = line.len();
    let start = range.start.min(len);
    let end = range.end.min(len);
    // The formats are ASCII; a range cutting a multi-byte character means
    // the line is not a valid fixed-width record, and the empty column will
    // surface as a field error downstream.
    line.get(start..end).unwrap_or("")
}

/// Parse an integer column.
///
/// Surrounding whitespace is trimmed first. When `allow_blank` is true, an
/// empty column or a lone "." parses as `None`; otherwise blank content is a
/// field format error, as is any non-blank content that is not a valid
/// integer.
pub fn parse_int(raw: &str, allow_blank: bool) -> Result<Option<i32>> {
    let trimmed = raw.trim();
    if is_blank(trimmed) {
        if allow_blank {
            return Ok(None);
        }
        return Err(RegistryError::field_format("integer", raw));
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| RegistryError::field_format("integer", trimmed))
}

/// Parse a floating-point column with the same blank semantics as
/// [`parse_int`].
pub fn parse_float(raw: &str, allow_blank: bool) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if is_blank(trimmed) {
        if allow_blank {
            return Ok(None);
        }
        return Err(RegistryError::field_format("float", raw));
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RegistryError::field_format("float", trimmed))
}

/// Extract a column as a trimmed string, `None` when blank.
pub fn parse_string(line: &str, range: Range<usize>) -> Option<String> {
    let trimmed = extract(line, range).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A blank column is empty or a lone "." left behind by some writers when a
/// float field has no value.
fn is_blank(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed == "."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        assert_eq!(extract("   12 FURNAS", 0..5), "   12");
        assert_eq!(extract("   12 FURNAS", 6..12), "FURNAS");
    }

    #[test]
    fn test_extract_clamps_to_line_length() {
        assert_eq!(extract("abc", 0..10), "abc");
        assert_eq!(extract("abc", 2..10), "c");
        assert_eq!(extract("abc", 5..10), "");
    }

    #[test]
    fn test_parse_int_valid() {
        assert_eq!(parse_int("  42 ", false).unwrap(), Some(42));
        assert_eq!(parse_int("-7", false).unwrap(), Some(-7));
    }

    #[test]
    fn test_parse_int_blank_semantics() {
        assert_eq!(parse_int("   ", true).unwrap(), None);
        assert_eq!(parse_int(".", true).unwrap(), None);
        assert!(parse_int("   ", false).is_err());
        assert!(parse_int(".", false).is_err());
    }

    #[test]
    fn test_parse_int_garbage_is_error_even_when_blank_allowed() {
        let err = parse_int(" 12x ", true).unwrap_err();
        match err {
            RegistryError::FieldFormat { kind, value } => {
                assert_eq!(kind, "integer");
                assert_eq!(value, "12x");
            }
            other => panic!("Expected FieldFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_float_valid() {
        assert_eq!(parse_float(" 120.00 ", false).unwrap(), Some(120.0));
        assert_eq!(parse_float("-1.5e2", false).unwrap(), Some(-150.0));
    }

    #[test]
    fn test_parse_float_blank_semantics() {
        assert_eq!(parse_float("", true).unwrap(), None);
        assert_eq!(parse_float(" . ", true).unwrap(), None);
        assert!(parse_float("", false).is_err());
        assert!(parse_float("12..5", true).is_err());
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(
            parse_string("   12 FURNAS      ", 6..18),
            Some("FURNAS".to_string())
        );
        assert_eq!(parse_string("   12             ", 6..18), None);
    }
}
