//! Lenient decoding of server timestamps.
//!
//! # Invariants
//! - RFC 3339 values are converted to UTC.
//! - Values without an offset are taken as UTC.

use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a server timestamp, with or without a UTC offset.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    let raw = raw.trim();
    let rfc3339_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(value) => return Ok(value.with_timezone(&Utc)),
        Err(err) => err,
    };
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or(rfc3339_err)
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(|err| invalid::<D::Error>(&raw, err))
}

pub(crate) fn deserialize_option<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .map_err(|err| invalid::<D::Error>(&raw, err)),
        None => Ok(None),
    }
}

fn invalid<E: serde::de::Error>(raw: &str, err: ParseError) -> E {
    E::custom(format!("invalid timestamp `{raw}`: {err}"))
}
