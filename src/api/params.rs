//! Date-range query parameters
//!
//! Upstream callers spell the date keys several ways. The accepted aliases
//! are listed once here and checked in declaration order; the first match
//! wins.

use std::collections::HashMap;

use crate::error::AppError;

/// Accepted spellings for the start date, in precedence order
pub const START_DATE_KEYS: &[&str] = &["start-Date", "start-date", "startDate", "startdate"];

/// Accepted spellings for the end date, in precedence order
pub const END_DATE_KEYS: &[&str] = &["end-Date", "end-date", "endDate", "enddate"];

/// A validated pair of date strings, passed to the query unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Extract and validate the start/end date parameters.
///
/// Only the `\d{4}-\d{2}-\d{2}` shape is checked, not calendar validity:
/// `2024-13-99` passes and reaches the query layer unchanged.
///
/// # Errors
/// - `AppError::MissingDateRange` when either side is absent under all
///   accepted spellings
/// - `AppError::InvalidDateFormat` when a value does not match the shape
pub fn extract_date_range(params: &HashMap<String, String>) -> Result<DateRange, AppError> {
    let start = lookup(params, START_DATE_KEYS).ok_or(AppError::MissingDateRange)?;
    let end = lookup(params, END_DATE_KEYS).ok_or(AppError::MissingDateRange)?;

    if !is_date_shaped(start) || !is_date_shaped(end) {
        return Err(AppError::InvalidDateFormat);
    }

    Ok(DateRange {
        start: start.to_string(),
        end: end.to_string(),
    })
}

fn lookup<'a>(params: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| params.get(*key).map(String::as_str))
}

/// Matches `^\d{4}-\d{2}-\d{2}$`
fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();

    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_alias_spelling_accepted() {
        for start_key in START_DATE_KEYS {
            for end_key in END_DATE_KEYS {
                let range = extract_date_range(&params(&[
                    (start_key, "2024-01-01"),
                    (end_key, "2024-01-31"),
                ]))
                .unwrap();
                assert_eq!(range.start, "2024-01-01");
                assert_eq!(range.end, "2024-01-31");
            }
        }
    }

    #[test]
    fn test_alias_precedence_order() {
        // When several spellings are present, the earlier alias wins
        let range = extract_date_range(&params(&[
            ("startdate", "2024-06-01"),
            ("start-Date", "2024-01-01"),
            ("endDate", "2024-01-31"),
        ]))
        .unwrap();
        assert_eq!(range.start, "2024-01-01");
    }

    #[test]
    fn test_missing_either_side_rejected() {
        assert!(matches!(
            extract_date_range(&params(&[("startDate", "2024-01-01")])),
            Err(AppError::MissingDateRange)
        ));
        assert!(matches!(
            extract_date_range(&params(&[("endDate", "2024-01-31")])),
            Err(AppError::MissingDateRange)
        ));
        assert!(matches!(
            extract_date_range(&params(&[])),
            Err(AppError::MissingDateRange)
        ));
    }

    #[test]
    fn test_shape_validation() {
        for bad in ["2024-1-01", "20240101", "2024/01/01", "2024-01-0a", ""] {
            assert!(
                matches!(
                    extract_date_range(&params(&[("startDate", bad), ("endDate", "2024-01-31")])),
                    Err(AppError::InvalidDateFormat)
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_no_semantic_date_check() {
        // Matches the pattern but is not a real date; passes through as-is
        let range = extract_date_range(&params(&[
            ("startDate", "2024-13-99"),
            ("endDate", "2024-13-99"),
        ]))
        .unwrap();
        assert_eq!(range.start, "2024-13-99");
        assert_eq!(range.end, "2024-13-99");
    }
}
