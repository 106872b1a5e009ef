//! Timestamp formatting used by the metadata comment.
//!
//! Timestamps are Unix seconds rendered in UTC so output does not depend on
//! the host time zone.

use crate::model::Timestamp;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn to_utc(ts: Timestamp) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// Formats `ts` as `YYYY-MM-DD HH:MM:SS`. Out-of-range values render as the epoch.
pub fn datetime_to_string(ts: Timestamp) -> String {
    to_utc(ts).format(DATETIME_FORMAT).to_string()
}

/// Parses the `datetime_to_string` format back to Unix seconds.
pub fn string_to_datetime(value: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}

/// Short human-readable form of `ts` relative to `now`.
///
/// - same day: `HH:MM`
/// - same year: `Mon DD`
/// - otherwise: `YYYY-MM-DD`
pub fn datetime_to_pretty(ts: Timestamp, now: Timestamp) -> String {
    let value = to_utc(ts);
    let now = to_utc(now);
    if value.date_naive() == now.date_naive() {
        value.format("%H:%M").to_string()
    } else if value.year() == now.year() {
        value.format("%b %d").to_string()
    } else {
        value.format("%Y-%m-%d").to_string()
    }
}

/// Current time as Unix seconds.
pub fn now() -> Timestamp {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::{datetime_to_pretty, datetime_to_string, string_to_datetime};

    // 2024-03-05 14:07:09 UTC
    const SAMPLE: i64 = 1_709_647_629;

    #[test]
    fn formats_and_parses_back() {
        assert_eq!(datetime_to_string(SAMPLE), "2024-03-05 14:07:09");
        assert_eq!(string_to_datetime("2024-03-05 14:07:09"), Some(SAMPLE));
        assert_eq!(string_to_datetime(" 2024-03-05 14:07:09 "), Some(SAMPLE));
    }

    #[test]
    fn zero_is_epoch() {
        assert_eq!(datetime_to_string(0), "1970-01-01 00:00:00");
        assert_eq!(string_to_datetime("1970-01-01 00:00:00"), Some(0));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!(string_to_datetime("yesterday"), None);
        assert_eq!(string_to_datetime("2024-13-01 00:00:00"), None);
    }

    #[test]
    fn pretty_depends_on_distance() {
        assert_eq!(datetime_to_pretty(SAMPLE, SAMPLE + 60), "14:07");
        assert_eq!(datetime_to_pretty(SAMPLE, SAMPLE + 40 * 86_400), "Mar 05");
        assert_eq!(datetime_to_pretty(SAMPLE, SAMPLE + 400 * 86_400), "2024-03-05");
    }
}
