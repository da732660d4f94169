//! Permissive calendar/date-time parsing
//!
//! Accepted forms, tried in order:
//!
//! 1. RFC 3339 ("2020-01-01T12:30:00Z", "2020-01-01T12:30:00+05:00")
//! 2. RFC 2822 ("Wed, 01 Jan 2020 12:30:00 +0000")
//! 3. Zone-less date-times, taken as UTC: `%Y-%m-%dT%H:%M:%S` and the
//!    space-separated equivalent (optionally with a fractional second),
//!    minute-precision variants, and `%Y/%m/%d %H:%M:%S`
//! 4. Dates, resolving to midnight UTC: `%Y-%m-%d`, `%Y/%m/%d`, `%m/%d/%Y`,
//!    `%d %B %Y`, `%B %d, %Y` (month names may be full or abbreviated)
//! 5. All-digit strings, read as Unix epoch seconds
//!
//! Anything else is a coercion failure, reported by the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Zone-less date-time formats, assumed UTC
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only formats, resolving to midnight UTC
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Parses a date/time string into a UTC timestamp.
///
/// Returns `None` when the text matches none of the accepted forms.
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight));
        }
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse::<i64>().ok().and_then(from_epoch);
    }

    None
}

/// Converts Unix epoch seconds into a UTC timestamp.
///
/// Returns `None` for seconds outside the representable range.
pub fn from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
