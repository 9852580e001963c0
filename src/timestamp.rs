//! Timestamp encoding shared by every snapshot format.
//!
//! Timestamps are written as RFC 3339 UTC strings with millisecond
//! precision. Reading also accepts bare calendar dates (`YYYY-MM-DD`), which
//! denote midnight UTC of that day.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;

/// Error returned when a timestamp string matches neither accepted format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised timestamp '{0}', expected RFC 3339 or YYYY-MM-DD")]
pub struct ParseTimestampError(pub String);

/// Parses an RFC 3339 timestamp or a bare calendar date.
///
/// # Errors
///
/// Returns [`ParseTimestampError`] when `raw` matches neither format.
pub fn parse(raw: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ParseTimestampError(raw.to_owned()))
}

/// Formats a timestamp in the canonical snapshot form.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drops sub-millisecond precision, so the value survives [`format`] and
/// [`parse`] unchanged.
#[must_use]
pub fn truncate(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

/// Serde `serialize_with` hook for snapshot timestamps.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Serde `deserialize_with` hook for snapshot timestamps.
///
/// # Errors
///
/// Fails when the value is not a string or [`parse`] rejects it.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}
