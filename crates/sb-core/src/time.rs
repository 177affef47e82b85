//! Timestamp parsing for dataset sources.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::{CoreError, CoreResult, Timestamp};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Whole seconds since the Unix epoch as a naive UTC timestamp.
pub fn from_epoch_seconds(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0)
        .unwrap_or_default()
        .naive_utc()
}

/// Parse a dataset timestamp cell.
///
/// Accepts RFC 3339 (converted to UTC), the common naive date-time layouts,
/// a bare date (midnight), or a number of seconds since the Unix epoch.
pub fn parse_timestamp(raw: &str) -> CoreResult<Timestamp> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(CoreError::InvalidTimestamp { raw: raw.to_string() });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(dt);
    }
    if let Ok(secs) = s.parse::<f64>()
        && secs.is_finite()
    {
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).round() as u32;
        if let Some(dt) = DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)) {
            return Ok(dt.naive_utc());
        }
    }

    Err(CoreError::InvalidTimestamp { raw: raw.to_string() })
}
