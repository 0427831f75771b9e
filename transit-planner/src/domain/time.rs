//! Timestamp handling for the schedule source's wire format.
//!
//! The upstream API returns instants as naive `"YYYY-MM-DD HH:MM:SS"`
//! strings with no timezone offset. The original system treated them as
//! already being in the query's local time; this crate follows suit by
//! parsing them as UTC, consistent end-to-end since every comparison the
//! search core makes is relative (durations, `<`, `>`), not against a
//! wall clock in a particular zone.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Error returned when an upstream timestamp string doesn't match the
/// expected format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {raw:?}: {reason}")]
pub struct TimeError {
    raw: String,
    reason: &'static str,
}

const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a schedule-source timestamp (`"2026-07-28 14:30:00"`) into UTC.
pub fn parse_wire_timestamp(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    let naive = NaiveDateTime::parse_from_str(raw, WIRE_FORMAT).map_err(|_| TimeError {
        raw: raw.to_string(),
        reason: "expected \"YYYY-MM-DD HH:MM:SS\"",
    })?;
    Ok(naive.and_utc())
}

/// Format an instant back into the wire format, e.g. for building query
/// strings against the schedule source.
pub fn format_wire_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(WIRE_FORMAT).to_string()
}

/// Format a date as the schedule source's `date=YYYY-MM-DD` query value.
pub fn format_wire_date(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_valid() {
        let t = parse_wire_timestamp("2026-07-28 14:30:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2026, 7, 28, 14, 30, 0).unwrap());
    }

    #[test]
    fn parse_rejects_bad_format() {
        assert!(parse_wire_timestamp("2026-07-28T14:30:00").is_err());
        assert!(parse_wire_timestamp("28/07/2026 14:30").is_err());
        assert!(parse_wire_timestamp("").is_err());
    }

    #[test]
    fn format_roundtrips() {
        let t = Utc.with_ymd_and_hms(2026, 7, 28, 0, 5, 9).unwrap();
        let s = format_wire_timestamp(t);
        assert_eq!(s, "2026-07-28 00:05:09");
        assert_eq!(parse_wire_timestamp(&s).unwrap(), t);
    }

    #[test]
    fn format_date() {
        let t = Utc.with_ymd_and_hms(2026, 1, 3, 23, 59, 0).unwrap();
        assert_eq!(format_wire_date(t), "2026-01-03");
    }
}
