//! Month-key (`YYYY-MM`) parsing and formatting.
//!
//! Month keys appear on activation records, manual reports, and monthly
//! submissions. They are validated at every API and storage boundary so the
//! aggregation engine can assume well-formed keys.

use chrono::{Datelike, NaiveDate};

use crate::error::CoreError;

/// Parse a `YYYY-MM` month key into `(year, month)`.
pub fn parse_month_key(key: &str) -> Result<(i32, u32), CoreError> {
    let invalid = || {
        CoreError::Validation(format!(
            "Invalid month key '{key}'. Expected YYYY-MM"
        ))
    };

    let (year_part, month_part) = key.split_once('-').ok_or_else(invalid)?;
    if year_part.len() != 4 || month_part.len() != 2 {
        return Err(invalid());
    }

    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok((year, month))
}

/// Format `(year, month)` as a `YYYY-MM` month key.
pub fn format_month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Validate a month key without using the parsed parts.
pub fn validate_month_key(key: &str) -> Result<(), CoreError> {
    parse_month_key(key).map(|_| ())
}

/// The month key a calendar date falls into.
pub fn month_key_of(date: NaiveDate) -> String {
    format_month_key(date.year(), date.month())
}

/// Inclusive calendar-year date bounds `[year-01-01, year-12-31]` used by
/// the raw-source readers.
pub fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    // Both endpoints exist for every year chrono can represent.
    let from = NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start");
    let to = NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end");
    (from, to)
}
