//! ISO-8601 timestamp encoding for manifest documents.
//!
//! Timestamps are always written with an explicit `+00:00` offset. On read, any
//! explicit offset is accepted and normalized to UTC; a timestamp without an
//! offset is rejected.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

/// Formats an instant as an ISO-8601 string carrying a `+00:00` offset.
#[must_use]
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Parses an ISO-8601 string that must carry timezone information.
///
/// # Errors
///
/// Returns a human-readable message if the string is naive (no offset) or is
/// not a timestamp at all.
pub fn parse(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    if NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").is_ok()
    {
        return Err(format!("timestamp must be timezone-aware: {value}"));
    }

    Err(format!("invalid ISO-8601 timestamp: {value}"))
}

/// Serializes a required timestamp.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

/// Deserializes a required timestamp, rejecting naive values.
///
/// # Errors
///
/// Fails if the value is not a string or carries no timezone.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(de::Error::custom)
}

/// Same contract for `Option<DateTime<Utc>>`, mapping JSON `null` to `None`.
pub mod option {
    use super::{DateTime, Deserialize, Deserializer, Serializer, Utc, de};

    /// Serializes an optional timestamp as a string or `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp; empty strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Fails on naive or malformed timestamps.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.is_empty() => super::parse(&raw).map(Some).map_err(de::Error::custom),
            _ => Ok(None),
        }
    }
}
