//! Time-window, core-hours and input-domain validation.

use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::{Booking, ErrorCode, WarningCode};

use super::time_utils::MINUTES_PER_DAY;

/// Checks a time against an allowed window.
///
/// Missing bounds are always satisfied. A time before `from` yields
/// `early_code`; a time after `to` yields `late_code`.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::validate_time_window;
/// use timecalc_engine::models::ErrorCode;
///
/// let codes = validate_time_window(450, Some(480), Some(540), ErrorCode::EarlyCome, ErrorCode::LateCome);
/// assert_eq!(codes, vec![ErrorCode::EarlyCome]);
///
/// let codes = validate_time_window(450, None, None, ErrorCode::EarlyCome, ErrorCode::LateCome);
/// assert!(codes.is_empty());
/// ```
pub fn validate_time_window(
    actual_time: i32,
    from: Option<i32>,
    to: Option<i32>,
    early_code: ErrorCode,
    late_code: ErrorCode,
) -> Vec<ErrorCode> {
    let mut codes = Vec::new();
    if from.is_some_and(|from| actual_time < from) {
        codes.push(early_code);
    }
    if to.is_some_and(|to| actual_time > to) {
        codes.push(late_code);
    }
    codes
}

/// Checks that attendance covers the required core hours.
///
/// Without both core bounds there is nothing to check (flextime without core
/// hours). With both bounds, a missing arrival or departure, an arrival after
/// `core_start`, or a departure before `core_end` yields
/// [`WarningCode::CoreHoursNotCovered`].
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::validate_core_hours;
/// use timecalc_engine::models::WarningCode;
///
/// assert!(validate_core_hours(Some(500), Some(1000), Some(540), Some(960)).is_empty());
/// assert_eq!(
///     validate_core_hours(Some(600), Some(1000), Some(540), Some(960)),
///     vec![WarningCode::CoreHoursNotCovered]
/// );
/// ```
pub fn validate_core_hours(
    first_come: Option<i32>,
    last_go: Option<i32>,
    core_start: Option<i32>,
    core_end: Option<i32>,
) -> Vec<WarningCode> {
    let (Some(core_start), Some(core_end)) = (core_start, core_end) else {
        return Vec::new();
    };
    let covered = match (first_come, last_go) {
        (Some(come), Some(go)) => come <= core_start && go >= core_end,
        _ => false,
    };
    if covered {
        Vec::new()
    } else {
        vec![WarningCode::CoreHoursNotCovered]
    }
}

/// Checks bookings against the input domain the engine expects.
///
/// The day calculator never calls this itself; callers run it before
/// handing bookings to the engine.
///
/// # Errors
///
/// Returns [`EngineError::InvalidBooking`] for a time outside `0..=1439`, a
/// duplicate ID, or a booking linked to itself.
pub fn validate_bookings(bookings: &[Booking]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for booking in bookings {
        if !(0..MINUTES_PER_DAY).contains(&booking.time) {
            return Err(EngineError::InvalidBooking {
                booking_id: booking.id.to_string(),
                message: format!("time {} is outside 0..={}", booking.time, MINUTES_PER_DAY - 1),
            });
        }
        if !seen.insert(&booking.id) {
            return Err(EngineError::InvalidBooking {
                booking_id: booking.id.to_string(),
                message: "duplicate booking id".to_string(),
            });
        }
        if booking.pair_id.as_ref() == Some(&booking.id) {
            return Err(EngineError::InvalidBooking {
                booking_id: booking.id.to_string(),
                message: "booking is linked to itself".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Direction};

    #[test]
    fn test_window_inside_bounds_is_clean() {
        let codes =
            validate_time_window(500, Some(480), Some(540), ErrorCode::EarlyCome, ErrorCode::LateCome);
        assert!(codes.is_empty());
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let early = ErrorCode::EarlyGo;
        let late = ErrorCode::LateGo;
        assert!(validate_time_window(960, Some(960), Some(1080), early, late).is_empty());
        assert!(validate_time_window(1080, Some(960), Some(1080), early, late).is_empty());
    }

    #[test]
    fn test_window_late_violation() {
        let codes =
            validate_time_window(1100, Some(960), Some(1080), ErrorCode::EarlyGo, ErrorCode::LateGo);
        assert_eq!(codes, vec![ErrorCode::LateGo]);
    }

    #[test]
    fn test_window_with_only_one_bound() {
        let codes = validate_time_window(100, None, Some(540), ErrorCode::EarlyCome, ErrorCode::LateCome);
        assert!(codes.is_empty());
        let codes = validate_time_window(600, None, Some(540), ErrorCode::EarlyCome, ErrorCode::LateCome);
        assert_eq!(codes, vec![ErrorCode::LateCome]);
    }

    #[test]
    fn test_core_hours_covered() {
        assert!(validate_core_hours(Some(500), Some(1000), Some(540), Some(960)).is_empty());
        assert!(validate_core_hours(Some(540), Some(960), Some(540), Some(960)).is_empty());
    }

    #[test]
    fn test_core_hours_late_arrival() {
        assert_eq!(
            validate_core_hours(Some(600), Some(1000), Some(540), Some(960)),
            vec![WarningCode::CoreHoursNotCovered]
        );
    }

    #[test]
    fn test_core_hours_early_departure() {
        assert_eq!(
            validate_core_hours(Some(500), Some(900), Some(540), Some(960)),
            vec![WarningCode::CoreHoursNotCovered]
        );
    }

    #[test]
    fn test_core_hours_without_bookings() {
        assert_eq!(
            validate_core_hours(Some(500), None, Some(540), Some(960)),
            vec![WarningCode::CoreHoursNotCovered]
        );
        assert_eq!(
            validate_core_hours(None, None, Some(540), Some(960)),
            vec![WarningCode::CoreHoursNotCovered]
        );
    }

    #[test]
    fn test_core_hours_not_configured() {
        assert!(validate_core_hours(None, None, None, None).is_empty());
        assert!(validate_core_hours(Some(600), Some(700), Some(540), None).is_empty());
    }

    #[test]
    fn test_validate_bookings_accepts_day_domain() {
        let bookings = vec![
            Booking::new("a", 0, Direction::In, Category::Work),
            Booking::new("b", 1439, Direction::Out, Category::Work).with_pair("a"),
        ];
        assert!(validate_bookings(&bookings).is_ok());
    }

    #[test]
    fn test_validate_bookings_rejects_out_of_range_time() {
        let bookings = vec![Booking::new("a", 1440, Direction::In, Category::Work)];
        match validate_bookings(&bookings) {
            Err(EngineError::InvalidBooking { booking_id, .. }) => assert_eq!(booking_id, "a"),
            other => panic!("Expected InvalidBooking, got {:?}", other),
        }
        let bookings = vec![Booking::new("n", -1, Direction::In, Category::Work)];
        assert!(validate_bookings(&bookings).is_err());
    }

    #[test]
    fn test_validate_bookings_rejects_duplicates_and_self_links() {
        let duplicates = vec![
            Booking::new("a", 480, Direction::In, Category::Work),
            Booking::new("a", 1020, Direction::Out, Category::Work),
        ];
        assert!(validate_bookings(&duplicates).is_err());

        let self_linked = vec![Booking::new("a", 480, Direction::In, Category::Work).with_pair("a")];
        match validate_bookings(&self_linked) {
            Err(EngineError::InvalidBooking { message, .. }) => {
                assert_eq!(message, "booking is linked to itself")
            }
            other => panic!("Expected InvalidBooking, got {:?}", other),
        }
    }
}
