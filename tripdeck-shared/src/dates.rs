/// Date normalization for user-supplied date strings
///
/// Search requests arrive with dates typed by hand in whatever format the
/// user is used to. This module parses them against a fixed, ordered list
/// of patterns and reformats the first match to canonical `YYYY-MM-DD`,
/// which is what both the database and the upstream search APIs expect.
///
/// The pattern order is a deliberate policy, not a locale guess: an
/// ambiguous string like `01/02/2025` always resolves as day-first
/// (February 1st) because `%d/%m/%Y` is tried before `%m/%d/%Y`.
///
/// # Example
///
/// ```
/// use tripdeck_shared::dates::normalize;
///
/// assert_eq!(normalize("22/06/2025").unwrap(), "2025-06-22");
/// assert_eq!(normalize("2025-06-22").unwrap(), "2025-06-22");
/// assert!(normalize("next tuesday").is_err());
/// ```

use chrono::NaiveDate;

/// Accepted input patterns, in resolution order.
///
/// ISO first so canonical input round-trips, then day-first slash, then
/// month-first slash, then the backslash-delimited day-first variant some
/// clients send.
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d\\%m\\%Y"];

/// Error type for date normalization
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    /// Input did not match any accepted pattern
    #[error("invalid date format: {0:?} (expected YYYY-MM-DD, DD/MM/YYYY, MM/DD/YYYY or DD\\MM\\YYYY)")]
    InvalidFormat(String),
}

/// Normalizes a free-form date string to `YYYY-MM-DD`.
///
/// Tries each pattern in [`INPUT_FORMATS`] in order and reformats the
/// first successful parse. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`DateError::InvalidFormat`] when no pattern matches; callers
/// surface this as a client error.
pub fn normalize(input: &str) -> Result<String, DateError> {
    let trimmed = input.trim();
    for format in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }
    Err(DateError::InvalidFormat(input.to_string()))
}
