//! Device timestamp parsing.
//!
//! Monitor exports carry `DevDateTime` in a handful of ISO 8601 shapes.
//! Timestamps are kept timezone-naive: when an offset is present the
//! wall-clock time as written is kept and the offset is dropped, so the
//! calendar day seen by classification matches the day printed in the file.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a device timestamp; `None` when the text is not a recognised form.
pub fn parse_device_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_local());
    }
    if let Ok(parsed) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.naive_local());
    }
    if let Some(parsed) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_naive_iso() {
        assert_eq!(
            parse_device_timestamp("2024-10-14T09:15:30"),
            Some(at(2024, 10, 14, 9, 15, 30))
        );
        assert_eq!(
            parse_device_timestamp("2024-10-14 09:15:30.250").map(|t| t.date()),
            NaiveDate::from_ymd_opt(2024, 10, 14)
        );
        assert_eq!(
            parse_device_timestamp("2024-10-14T09:15"),
            Some(at(2024, 10, 14, 9, 15, 0))
        );
    }

    #[test]
    fn keeps_wall_clock_when_offset_present() {
        assert_eq!(
            parse_device_timestamp("2024-10-14T23:30:00-05:00"),
            Some(at(2024, 10, 14, 23, 30, 0))
        );
        assert_eq!(
            parse_device_timestamp("2024-10-14T23:30:00Z"),
            Some(at(2024, 10, 14, 23, 30, 0))
        );
        assert_eq!(
            parse_device_timestamp("2024-10-14T23:30:00-0500"),
            Some(at(2024, 10, 14, 23, 30, 0))
        );
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(
            parse_device_timestamp("2024-10-14"),
            Some(at(2024, 10, 14, 0, 0, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_device_timestamp(""), None);
        assert_eq!(parse_device_timestamp("not a date"), None);
        assert_eq!(parse_device_timestamp("2024-13-40T00:00:00"), None);
    }
}
