//! Break deduction.
//!
//! Combines the break time recorded through break bookings with the break
//! rules of the day schedule. Recorded breaks always count; configured rules
//! may add automatic deductions on top.

use serde::{Deserialize, Serialize};

use crate::models::{BookingPair, BreakConfig, BreakType, Category};

use super::time_utils::{MINUTES_PER_DAY, overlap_minutes};

/// Break minutes for one day, split by origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakDeduction {
    /// Minutes taken from break pairs.
    pub recorded_minutes: i32,
    /// Minutes deducted by configured break rules.
    pub automatic_minutes: i32,
}

impl BreakDeduction {
    /// Recorded plus automatic minutes.
    pub fn total_minutes(&self) -> i32 {
        self.recorded_minutes + self.automatic_minutes
    }
}

/// Computes the break minutes of a day.
///
/// * `Fixed` rules deduct the work time overlapping their window, capped at
///   the rule's duration, less any recorded break inside the window.
/// * `Variable` rules deduct their duration only when auto-deduction is on,
///   no break was recorded, and gross time reached `after_work_minutes`.
/// * `Minimum` rules top recorded breaks up to their duration once gross
///   time reached `after_work_minutes`, if auto-deduction is on.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::{calculate_break_deduction, pair_bookings};
/// use timecalc_engine::models::{Booking, BreakConfig, BreakType, Category, Direction};
///
/// let pairs = pair_bookings(&[
///     Booking::new("w1", 480, Direction::In, Category::Work),
///     Booking::new("w2", 1020, Direction::Out, Category::Work),
/// ])
/// .pairs;
/// let minimum = BreakConfig {
///     break_type: BreakType::Minimum,
///     start: None,
///     end: None,
///     duration: 30,
///     after_work_minutes: Some(360),
///     auto_deduct: true,
/// };
///
/// let deduction = calculate_break_deduction(&[minimum], &pairs, 540);
/// assert_eq!(deduction.recorded_minutes, 0);
/// assert_eq!(deduction.automatic_minutes, 30);
/// ```
pub fn calculate_break_deduction(
    configs: &[BreakConfig],
    pairs: &[BookingPair],
    gross_minutes: i32,
) -> BreakDeduction {
    let recorded_minutes: i32 = pairs
        .iter()
        .filter(|p| p.category == Category::Break)
        .map(|p| p.duration)
        .sum();

    let automatic_minutes = configs
        .iter()
        .map(|config| rule_deduction(config, pairs, recorded_minutes, gross_minutes))
        .sum();

    BreakDeduction {
        recorded_minutes,
        automatic_minutes,
    }
}

fn rule_deduction(
    config: &BreakConfig,
    pairs: &[BookingPair],
    recorded_minutes: i32,
    gross_minutes: i32,
) -> i32 {
    let threshold_reached = gross_minutes >= config.after_work_minutes.unwrap_or(0);

    match config.break_type {
        BreakType::Fixed => {
            let (Some(start), Some(end)) = (config.start, config.end) else {
                return 0;
            };
            let worked = window_overlap(pairs, Category::Work, start, end);
            let taken = window_overlap(pairs, Category::Break, start, end);
            (worked.min(config.duration) - taken).max(0)
        }
        BreakType::Variable => {
            if config.auto_deduct && recorded_minutes == 0 && threshold_reached {
                config.duration
            } else {
                0
            }
        }
        BreakType::Minimum => {
            if config.auto_deduct && threshold_reached {
                (config.duration - recorded_minutes).max(0)
            } else {
                0
            }
        }
    }
}

/// Minutes of the given category's pairs inside `[start, end)`, also
/// counting the same window on the following day for cross-midnight pairs.
fn window_overlap(pairs: &[BookingPair], category: Category, start: i32, end: i32) -> i32 {
    pairs
        .iter()
        .filter(|p| p.category == category)
        .map(|p| {
            overlap_minutes(p.start_time(), p.end_time(), start, end)
                + overlap_minutes(
                    p.start_time(),
                    p.end_time(),
                    start + MINUTES_PER_DAY,
                    end + MINUTES_PER_DAY,
                )
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::pair_bookings;
    use crate::models::{Booking, Direction};

    fn day_pairs(with_break: Option<(i32, i32)>) -> Vec<BookingPair> {
        let mut bookings = vec![
            Booking::new("w1", 480, Direction::In, Category::Work),
            Booking::new("w2", 1020, Direction::Out, Category::Work),
        ];
        if let Some((start, end)) = with_break {
            bookings.push(Booking::new("b1", start, Direction::Out, Category::Break));
            bookings.push(Booking::new("b2", end, Direction::In, Category::Break));
        }
        pair_bookings(&bookings).pairs
    }

    fn rule(break_type: BreakType, duration: i32, after: Option<i32>, auto: bool) -> BreakConfig {
        BreakConfig {
            break_type,
            start: None,
            end: None,
            duration,
            after_work_minutes: after,
            auto_deduct: auto,
        }
    }

    fn fixed(start: i32, end: i32, duration: i32) -> BreakConfig {
        BreakConfig {
            start: Some(start),
            end: Some(end),
            ..rule(BreakType::Fixed, duration, None, false)
        }
    }

    #[test]
    fn test_recorded_breaks_without_rules() {
        let deduction = calculate_break_deduction(&[], &day_pairs(Some((720, 750))), 540);
        assert_eq!(deduction.recorded_minutes, 30);
        assert_eq!(deduction.automatic_minutes, 0);
        assert_eq!(deduction.total_minutes(), 30);
    }

    #[test]
    fn test_fixed_break_deducted_when_work_overlaps() {
        let deduction = calculate_break_deduction(&[fixed(720, 750, 30)], &day_pairs(None), 540);
        assert_eq!(deduction.automatic_minutes, 30);
    }

    #[test]
    fn test_fixed_break_not_double_counted_with_recorded_break() {
        let deduction =
            calculate_break_deduction(&[fixed(720, 750, 30)], &day_pairs(Some((720, 750))), 540);
        assert_eq!(deduction.recorded_minutes, 30);
        assert_eq!(deduction.automatic_minutes, 0);
    }

    #[test]
    fn test_fixed_break_partial_overlap() {
        let pairs = pair_bookings(&[
            Booking::new("w1", 735, Direction::In, Category::Work),
            Booking::new("w2", 1020, Direction::Out, Category::Work),
        ])
        .pairs;
        let deduction = calculate_break_deduction(&[fixed(720, 750, 30)], &pairs, 285);
        assert_eq!(deduction.automatic_minutes, 15);
    }

    #[test]
    fn test_fixed_break_after_midnight_on_night_shift() {
        let pairs = pair_bookings(&[
            Booking::new("w1", 1320, Direction::In, Category::Work),
            Booking::new("w2", 360, Direction::Out, Category::Work),
        ])
        .pairs;
        let deduction = calculate_break_deduction(&[fixed(120, 150, 30)], &pairs, 480);
        assert_eq!(deduction.automatic_minutes, 30);
    }

    #[test]
    fn test_variable_break_only_when_nothing_recorded() {
        let variable = rule(BreakType::Variable, 30, Some(360), true);

        let none_booked = calculate_break_deduction(&[variable.clone()], &day_pairs(None), 540);
        assert_eq!(none_booked.automatic_minutes, 30);

        let booked = calculate_break_deduction(&[variable], &day_pairs(Some((720, 735))), 540);
        assert_eq!(booked.automatic_minutes, 0);
        assert_eq!(booked.recorded_minutes, 15);
    }

    #[test]
    fn test_variable_break_requires_auto_deduct() {
        let variable = rule(BreakType::Variable, 30, None, false);
        let deduction = calculate_break_deduction(&[variable], &day_pairs(None), 540);
        assert_eq!(deduction.automatic_minutes, 0);
    }

    #[test]
    fn test_minimum_break_tops_up_shortfall() {
        let minimum = rule(BreakType::Minimum, 30, Some(360), true);
        let deduction = calculate_break_deduction(&[minimum], &day_pairs(Some((720, 740))), 540);
        assert_eq!(deduction.recorded_minutes, 20);
        assert_eq!(deduction.automatic_minutes, 10);
        assert_eq!(deduction.total_minutes(), 30);
    }

    #[test]
    fn test_minimum_break_below_threshold_is_skipped() {
        let minimum = rule(BreakType::Minimum, 30, Some(360), true);
        let deduction = calculate_break_deduction(&[minimum], &day_pairs(None), 300);
        assert_eq!(deduction.automatic_minutes, 0);
    }
}
