//! Lenient timestamp parsing for date-like columns.
//!
//! Accepted shapes, tried in order:
//!
//! - RFC 3339 (`2024-03-09T10:15:00Z`, `2024-03-09T10:15:00+02:00`)
//! - `YYYY-MM-DD HH:MM:SS[.f]` or `YYYY-MM-DDTHH:MM:SS[.f]` with a numeric offset
//! - the same with a trailing ` UTC`, or with no zone at all
//! - `YYYY-MM-DD HH:MM`
//! - dates alone: `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY`
//!
//! Values without a zone are taken as UTC. Dates alone map to midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a cell as a UTC timestamp. `None` when no accepted shape matches.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(value, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    let naive = value.strip_suffix(" UTC").unwrap_or(value).trim_end();
    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(ts.and_utc());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(naive, format).ok())
        .map(|day| day.and_time(NaiveTime::MIN).and_utc())
}
