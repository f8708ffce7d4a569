//! Wall-clock arithmetic on `HH:MM` times.
//!
//! All shifts wrap through midnight: `23:50 + 15 min = 00:05`.

use chrono::{NaiveTime, TimeDelta};
use tracing::warn;

/// Format used for every time in schedules and reports.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses an `HH:MM` string.
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).ok()
}

/// Formats a time as `HH:MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Shifts `time` by `minutes`, wrapping around midnight.
///
/// A shift too large to represent leaves `time` unchanged.
pub fn shift_minutes(time: NaiveTime, minutes: i64) -> NaiveTime {
    TimeDelta::try_minutes(minutes)
        .map(|delta| time.overflowing_add_signed(delta).0)
        .unwrap_or(time)
}

/// Shifts `time` by `hours`, wrapping around midnight.
pub fn shift_hours(time: NaiveTime, hours: i64) -> NaiveTime {
    TimeDelta::try_hours(hours)
        .map(|delta| time.overflowing_add_signed(delta).0)
        .unwrap_or(time)
}

/// Adds minutes to an `HH:MM` string.
///
/// Unparseable input is returned unchanged.
///
/// # Examples
///
/// ```
/// use u_shuttle::schedule::add_minutes;
///
/// assert_eq!(add_minutes("07:58", 5), "08:03");
/// assert_eq!(add_minutes("23:50", 15), "00:05");
/// assert_eq!(add_minutes("soon", 15), "soon");
/// ```
pub fn add_minutes(time: &str, minutes: i64) -> String {
    match parse_time(time) {
        Some(parsed) => format_time(shift_minutes(parsed, minutes)),
        None => {
            warn!(time, "unparseable time, left unchanged");
            time.to_string()
        }
    }
}

/// Adds hours to an `HH:MM` string.
///
/// Unparseable input is returned unchanged.
///
/// # Examples
///
/// ```
/// use u_shuttle::schedule::add_hours;
///
/// assert_eq!(add_hours("22:00", 6), "04:00");
/// assert_eq!(add_hours("8 o'clock", 6), "8 o'clock");
/// ```
pub fn add_hours(time: &str, hours: i64) -> String {
    match parse_time(time) {
        Some(parsed) => format_time(shift_hours(parsed, hours)),
        None => {
            warn!(time, "unparseable time, left unchanged");
            time.to_string()
        }
    }
}

/// Serializes a `NaiveTime` as `HH:MM`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    #[test]
    fn test_add_minutes_within_hour() {
        assert_eq!(add_minutes("08:00", 10), "08:10");
    }

    #[test]
    fn test_add_minutes_crosses_hour() {
        assert_eq!(add_minutes("07:58", 5), "08:03");
    }

    #[test]
    fn test_add_minutes_crosses_midnight() {
        assert_eq!(add_minutes("23:50", 15), "00:05");
    }

    #[test]
    fn test_add_negative_minutes() {
        assert_eq!(add_minutes("00:05", -10), "23:55");
    }

    #[test]
    fn test_add_hours_crosses_midnight() {
        assert_eq!(add_hours("22:00", 6), "04:00");
        assert_eq!(add_hours("08:15", 6), "14:15");
    }

    #[test]
    fn test_malformed_input_is_returned_unchanged() {
        assert_eq!(add_minutes("25:00", 5), "25:00");
        assert_eq!(add_minutes("08:64", 5), "08:64");
        assert_eq!(add_minutes("", 5), "");
        assert_eq!(add_hours("noon", 1), "noon");
    }

    #[test]
    fn test_huge_shift_is_ignored() {
        assert_eq!(shift_minutes(t(8, 0), i64::MAX), t(8, 0));
        assert_eq!(shift_hours(t(8, 0), i64::MIN), t(8, 0));
    }

    #[test]
    fn test_full_day_shift_is_identity() {
        assert_eq!(shift_minutes(t(9, 30), 24 * 60), t(9, 30));
        assert_eq!(shift_hours(t(9, 30), 48), t(9, 30));
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(parse_time("08:05"), Some(t(8, 5)));
        assert_eq!(parse_time(" 17:45 "), Some(t(17, 45)));
        assert_eq!(parse_time("17"), None);
        assert_eq!(format_time(t(6, 7)), "06:07");
    }
}
