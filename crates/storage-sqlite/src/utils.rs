//! Helpers for the TEXT-encoded columns.
//!
//! SQLite has no native decimal or timestamp type; prices are stored as
//! decimal strings and instants as a fixed sortable UTC format, so that
//! lexicographic comparison in SQL matches chronological order.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fixed-width UTC timestamp format. Lexicographic order equals
/// chronological order, which the movement range queries rely on.
pub const SQLITE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn fmt_utc(instant: DateTime<Utc>) -> String {
    instant.format(SQLITE_DATETIME_FORMAT).to_string()
}

/// Parses a stored timestamp, accepting RFC3339 variants as a fallback.
/// Unparseable values fall back to the Unix epoch and are logged; they
/// indicate a corrupted row, not a user error.
pub fn parse_utc_tolerant(value_str: &str, field_name: &str) -> DateTime<Utc> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(value_str, SQLITE_DATETIME_FORMAT) {
        return Utc.from_utc_datetime(&dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value_str) {
        return dt.with_timezone(&Utc);
    }
    log::error!(
        "Failed to parse {} '{}' as a timestamp. Falling back to epoch.",
        field_name,
        value_str
    );
    DateTime::<Utc>::UNIX_EPOCH
}

/// Parses a stored decimal string, with a fallback for scientific notation.
pub fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match Decimal::from_scientific(value_str) {
            Ok(d) => d,
            Err(e_scientific) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as scientific (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_scientific
                );
                Decimal::ZERO
            }
        },
    }
}
