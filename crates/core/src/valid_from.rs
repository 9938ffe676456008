//! Parsing of address `valid_from` timestamps.
//!
//! Forms submit either a bare date (`2025-01-01`) or a `datetime-local` value
//! (`2025-01-01T12:34`). Values read back from the API carry seconds and
//! possibly microseconds, and must round-trip so an edit can match the stored
//! key exactly.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Accepted date-time layouts, tried in order. `%.f` also matches no fraction.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a `valid_from` value.
///
/// A bare date is taken as midnight of that day.
pub fn parse_valid_from(input: &str) -> Result<Timestamp, CoreError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CoreError::Validation("Valid from is required".into()));
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }

    Err(CoreError::Validation(format!(
        "Invalid valid_from '{input}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]"
    )))
}

/// Serde adapter: `#[serde(deserialize_with = "userdir_core::valid_from::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_valid_from(&raw).map_err(serde::de::Error::custom)
}
