//! Minute-of-day arithmetic.
//!
//! Times throughout the engine are integer minutes from midnight. Values
//! above 1439 only appear after cross-midnight normalization.

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Moves an end time onto the next day when it lies before the start.
///
/// The returned value is always `>= start_minutes`, so
/// `normalize_cross_midnight(s, e) - s` is a non-negative duration.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::normalize_cross_midnight;
///
/// assert_eq!(normalize_cross_midnight(480, 1020), 1020);
/// assert_eq!(normalize_cross_midnight(1400, 50), 1490);
/// ```
pub fn normalize_cross_midnight(start_minutes: i32, end_minutes: i32) -> i32 {
    if end_minutes < start_minutes {
        end_minutes + MINUTES_PER_DAY
    } else {
        end_minutes
    }
}

/// Length of the interval from `start` to `end`, crossing midnight if needed.
pub fn interval_duration(start_minutes: i32, end_minutes: i32) -> i32 {
    normalize_cross_midnight(start_minutes, end_minutes) - start_minutes
}

/// Minutes shared by the intervals `[a_start, a_end)` and `[b_start, b_end)`.
pub fn overlap_minutes(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> i32 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

/// Converts a clock time to minutes from midnight, dropping seconds.
pub fn time_to_minutes(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

/// Converts minutes to a clock time, wrapping values past midnight.
///
/// Returns `None` for negative input.
pub fn minutes_to_time(minutes: i32) -> Option<NaiveTime> {
    if minutes < 0 {
        return None;
    }
    let wrapped = minutes % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt((wrapped / 60) as u32, (wrapped % 60) as u32, 0)
}

/// Parses an `HH:MM` string into minutes from midnight.
pub fn parse_hhmm(value: &str) -> Option<i32> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .ok()
        .map(time_to_minutes)
}

/// Formats minutes as `HH:MM`; hours may exceed 23 for normalized values.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::format_minutes;
///
/// assert_eq!(format_minutes(485), "08:05");
/// assert_eq!(format_minutes(1490), "24:50");
/// assert_eq!(format_minutes(-30), "-00:30");
/// ```
pub fn format_minutes(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let abs = minutes.abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Converts minutes to decimal hours for payroll export.
pub fn minutes_to_hours(minutes: i32) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_normalize_leaves_ordered_interval_unchanged() {
        assert_eq!(normalize_cross_midnight(480, 1020), 1020);
        assert_eq!(normalize_cross_midnight(480, 480), 480);
    }

    #[test]
    fn test_normalize_moves_end_to_next_day() {
        assert_eq!(normalize_cross_midnight(1400, 50), 1490);
        assert_eq!(normalize_cross_midnight(1439, 0), 1440);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_cross_midnight(1320, 360);
        assert_eq!(normalize_cross_midnight(1320, once), once);
    }

    #[test]
    fn test_interval_duration() {
        assert_eq!(interval_duration(480, 1020), 540);
        assert_eq!(interval_duration(1400, 50), 90);
        assert_eq!(interval_duration(600, 600), 0);
    }

    #[test]
    fn test_overlap_minutes() {
        assert_eq!(overlap_minutes(480, 1020, 720, 750), 30);
        assert_eq!(overlap_minutes(480, 730, 720, 750), 10);
        assert_eq!(overlap_minutes(480, 600, 720, 750), 0);
    }

    #[test]
    fn test_clock_time_conversions() {
        let time = NaiveTime::from_hms_opt(8, 5, 30).unwrap();
        assert_eq!(time_to_minutes(time), 485);
        assert_eq!(minutes_to_time(485), NaiveTime::from_hms_opt(8, 5, 0));
        assert_eq!(minutes_to_time(1490), NaiveTime::from_hms_opt(0, 50, 0));
        assert_eq!(minutes_to_time(-1), None);
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("08:00"), Some(480));
        assert_eq!(parse_hhmm(" 23:59 "), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("eight"), None);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(format_minutes(1439), "23:59");
        assert_eq!(format_minutes(-75), "-01:15");
    }

    #[test]
    fn test_minutes_to_hours() {
        assert_eq!(minutes_to_hours(450), Decimal::from_str("7.5").unwrap());
        assert_eq!(minutes_to_hours(0), Decimal::ZERO);
    }
}
