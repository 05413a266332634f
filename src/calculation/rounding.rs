//! Rounding of calculated times.
//!
//! Arrival and departure rounding are configured independently and are
//! applied after tolerance normalization.

use crate::models::{DaySchedule, RoundingConfig, RoundingMode};

/// Rounds a time according to an optional rounding configuration.
///
/// Without a configuration, or with an interval of zero or less, the time
/// is returned unchanged. `Subtract` never produces a negative time.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::round_time;
/// use timecalc_engine::models::{RoundingConfig, RoundingMode};
///
/// let up = RoundingConfig::new(RoundingMode::Up, 15);
/// assert_eq!(round_time(481, Some(&up)), 495);
///
/// let nearest = RoundingConfig::new(RoundingMode::Nearest, 15);
/// assert_eq!(round_time(487, Some(&nearest)), 480);
/// assert_eq!(round_time(488, Some(&nearest)), 495);
///
/// assert_eq!(round_time(481, None), 481);
/// ```
pub fn round_time(time: i32, config: Option<&RoundingConfig>) -> i32 {
    let Some(config) = config else {
        return time;
    };
    let interval = config.interval;
    if interval <= 0 {
        return time;
    }

    match config.mode {
        RoundingMode::Down => time.div_euclid(interval) * interval,
        RoundingMode::Up => {
            let remainder = time.rem_euclid(interval);
            if remainder == 0 {
                time
            } else {
                time + interval - remainder
            }
        }
        RoundingMode::Nearest => {
            let remainder = time.rem_euclid(interval);
            if remainder * 2 >= interval {
                time + interval - remainder
            } else {
                time - remainder
            }
        }
        RoundingMode::Add => time + interval,
        RoundingMode::Subtract => (time - interval).max(0),
    }
}

/// Rounds an arrival time with the schedule's arrival rounding.
pub fn round_come_time(time: i32, schedule: &DaySchedule) -> i32 {
    round_time(time, schedule.come_rounding.as_ref())
}

/// Rounds a departure time with the schedule's departure rounding.
pub fn round_go_time(time: i32, schedule: &DaySchedule) -> i32 {
    round_time(time, schedule.go_rounding.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(mode: RoundingMode, interval: i32) -> RoundingConfig {
        RoundingConfig::new(mode, interval)
    }

    #[test]
    fn test_round_down() {
        let config = cfg(RoundingMode::Down, 15);
        assert_eq!(round_time(1034, Some(&config)), 1020);
        assert_eq!(round_time(1020, Some(&config)), 1020);
        assert_eq!(round_time(1019, Some(&config)), 1005);
    }

    #[test]
    fn test_round_up() {
        let config = cfg(RoundingMode::Up, 15);
        assert_eq!(round_time(466, Some(&config)), 480);
        assert_eq!(round_time(480, Some(&config)), 480);
        assert_eq!(round_time(1439, Some(&config)), 1440);
    }

    #[test]
    fn test_round_nearest_rounds_half_up() {
        let config = cfg(RoundingMode::Nearest, 10);
        assert_eq!(round_time(484, Some(&config)), 480);
        assert_eq!(round_time(485, Some(&config)), 490);
        assert_eq!(round_time(486, Some(&config)), 490);
    }

    #[test]
    fn test_add_and_subtract_shift_by_interval() {
        assert_eq!(round_time(480, Some(&cfg(RoundingMode::Add, 5))), 485);
        assert_eq!(round_time(480, Some(&cfg(RoundingMode::Subtract, 5))), 475);
        assert_eq!(round_time(3, Some(&cfg(RoundingMode::Subtract, 5))), 0);
    }

    #[test]
    fn test_non_positive_interval_leaves_time_unchanged() {
        assert_eq!(round_time(487, Some(&cfg(RoundingMode::Up, 0))), 487);
        assert_eq!(round_time(487, Some(&cfg(RoundingMode::Down, -15))), 487);
    }

    #[test]
    fn test_come_and_go_rounding_are_independent() {
        let schedule = DaySchedule {
            come_rounding: Some(cfg(RoundingMode::Up, 15)),
            go_rounding: Some(cfg(RoundingMode::Down, 15)),
            ..Default::default()
        };
        assert_eq!(round_come_time(482, &schedule), 495);
        assert_eq!(round_go_time(1034, &schedule), 1020);
    }

    #[test]
    fn test_missing_rounding_config_passes_through() {
        let schedule = DaySchedule::default();
        assert_eq!(round_come_time(482, &schedule), 482);
        assert_eq!(round_go_time(1034, &schedule), 1034);
    }
}
