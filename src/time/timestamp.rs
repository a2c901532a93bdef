use crate::time::error::Error;
use chrono::{NaiveDateTime, TimeZone, Utc};
use lazy_static::*;
use regex::Regex;

const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

lazy_static! {
    static ref ISO_TIMESTAMP_REGEX: Regex = Regex::new(
        r"^(?P<seconds>[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2})(?:\.(?P<fraction>[0-9]+))?$"
    )
    .expect("Regex compilation error");
}

/// Turns an ISO-8601 string such as `2013-05-02T20:30:42.303176` into a
/// timestamp with second precision. The fractional part is dropped.
pub fn parse_iso_timestamp(value: &str) -> Result<NaiveDateTime, Error> {
    let caps = ISO_TIMESTAMP_REGEX
        .captures(value)
        .ok_or_else(|| Error::MalformedTimestamp(value.to_owned()))?;
    let seconds = caps
        .name("seconds")
        .map(|m| m.as_str())
        .ok_or_else(|| Error::MalformedTimestamp(value.to_owned()))?;
    NaiveDateTime::parse_from_str(seconds, SECONDS_FORMAT)
        .map_err(|e| Error::OutOfRange(value.to_owned(), e.to_string()))
}

/// Unix epoch seconds of a zone-less timestamp, read as UTC.
pub fn to_epoch_seconds(time: &NaiveDateTime) -> f64 {
    Utc.from_utc_datetime(time).timestamp() as f64
}
