//! Day schedule configuration.
//!
//! A [`DaySchedule`] is the per-employee-day configuration the engine
//! evaluates bookings against. Every bound is optional: `None` means
//! "no constraint configured", which is never the same as a bound of zero.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Grace windows around the expected arrival and departure times.
///
/// All values are minutes and are interpreted relative to the expected time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Late arrival forgiven up to this many minutes.
    pub come_plus: i32,
    /// Early arrival forgiven up to this many minutes.
    pub come_minus: i32,
    /// Late departure forgiven up to this many minutes.
    pub go_plus: i32,
    /// Early departure forgiven up to this many minutes.
    pub go_minus: i32,
}

/// How a time is moved onto a rounding boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round up to the next multiple of the interval.
    Up,
    /// Round down to the previous multiple of the interval.
    Down,
    /// Round to the nearest multiple, halves rounding up.
    Nearest,
    /// Add a fixed number of minutes.
    Add,
    /// Subtract a fixed number of minutes.
    Subtract,
}

/// Rounding applied to either arrival or departure times.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{RoundingConfig, RoundingMode};
///
/// let quarter_hours = RoundingConfig::new(RoundingMode::Up, 15);
/// assert_eq!(quarter_hours.interval, 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingConfig {
    /// The rounding direction.
    pub mode: RoundingMode,
    /// Interval (or fixed offset for add/subtract) in minutes.
    pub interval: i32,
}

impl RoundingConfig {
    /// Creates a rounding configuration.
    pub fn new(mode: RoundingMode, interval: i32) -> Self {
        Self { mode, interval }
    }
}

/// The kind of a configured break rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakType {
    /// A break at a fixed time of day, deducted whenever work overlaps it.
    Fixed,
    /// A break taken at any time; deducted automatically only if none was booked.
    Variable,
    /// A minimum total break once enough time has been worked.
    Minimum,
}

/// One entry of a day schedule's break configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakConfig {
    /// The break rule kind.
    pub break_type: BreakType,
    /// Start of the window, fixed breaks only.
    #[serde(default)]
    pub start: Option<i32>,
    /// End of the window, fixed breaks only.
    #[serde(default)]
    pub end: Option<i32>,
    /// Break length in minutes.
    pub duration: i32,
    /// Gross work time required before the rule applies.
    #[serde(default)]
    pub after_work_minutes: Option<i32>,
    /// Whether the engine may deduct the break without a booking.
    #[serde(default)]
    pub auto_deduct: bool,
}

/// Configuration for one employee-day.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::{DaySchedule, ToleranceConfig};
///
/// let schedule = DaySchedule {
///     come_from: Some(480),
///     go_to: Some(1020),
///     tolerance: ToleranceConfig { come_minus: 10, ..Default::default() },
///     target_minutes: 480,
///     ..Default::default()
/// };
/// assert_eq!(schedule.schedule_come_target(), Some(480));
/// assert_eq!(schedule.schedule_go_target(), Some(1020));
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySchedule {
    /// Earliest allowed arrival.
    pub come_from: Option<i32>,
    /// Latest allowed arrival.
    pub come_to: Option<i32>,
    /// Earliest allowed departure.
    pub go_from: Option<i32>,
    /// Latest allowed departure.
    pub go_to: Option<i32>,
    /// Start of the required core hours.
    pub core_start: Option<i32>,
    /// End of the required core hours.
    pub core_end: Option<i32>,
    /// Explicit expected arrival, overriding `come_from`.
    pub come_target: Option<i32>,
    /// Explicit expected departure, overriding `go_to`.
    pub go_target: Option<i32>,
    /// Grace windows around the expected times.
    pub tolerance: ToleranceConfig,
    /// Rounding applied to arrivals.
    pub come_rounding: Option<RoundingConfig>,
    /// Rounding applied to departures.
    pub go_rounding: Option<RoundingConfig>,
    /// Break rules.
    pub breaks: Vec<BreakConfig>,
    /// Regular (target) working minutes for the day.
    pub target_minutes: i32,
    /// Lower bound for net work time.
    pub min_net_work_time: Option<i32>,
    /// Upper bound for net work time; excess is capped.
    pub max_net_work_time: Option<i32>,
}

impl DaySchedule {
    /// The time arrivals are normalized against.
    pub fn schedule_come_target(&self) -> Option<i32> {
        self.come_target.or(self.come_from)
    }

    /// The time departures are normalized against.
    pub fn schedule_go_target(&self) -> Option<i32> {
        self.go_target.or(self.go_to)
    }

    /// Checks the schedule for inconsistent settings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        check_ordered("come_from", self.come_from, self.come_to)?;
        check_ordered("go_from", self.go_from, self.go_to)?;
        check_distinct("core_start", self.core_start, self.core_end)?;
        check_ordered("min_net_work_time", self.min_net_work_time, self.max_net_work_time)?;

        let tolerances = [
            ("tolerance.come_plus", self.tolerance.come_plus),
            ("tolerance.come_minus", self.tolerance.come_minus),
            ("tolerance.go_plus", self.tolerance.go_plus),
            ("tolerance.go_minus", self.tolerance.go_minus),
            ("target_minutes", self.target_minutes),
        ];
        for (field, value) in tolerances {
            check_non_negative(field, value)?;
        }
        if let Some(min) = self.min_net_work_time {
            check_non_negative("min_net_work_time", min)?;
        }

        for (field, rounding) in [
            ("come_rounding", self.come_rounding),
            ("go_rounding", self.go_rounding),
        ] {
            if let Some(rounding) = rounding {
                if rounding.interval <= 0 {
                    return Err(invalid(field, "interval must be positive"));
                }
            }
        }

        for (index, config) in self.breaks.iter().enumerate() {
            let field = format!("breaks[{}]", index);
            check_non_negative(&field, config.duration)?;
            if config.break_type == BreakType::Fixed {
                match (config.start, config.end) {
                    (Some(start), Some(end)) if start < end => {}
                    _ => {
                        return Err(invalid(
                            &field,
                            "fixed break needs a start before its end",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidSchedule {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_ordered(field: &str, lower: Option<i32>, upper: Option<i32>) -> EngineResult<()> {
    match (lower, upper) {
        (Some(lower), Some(upper)) if lower > upper => Err(invalid(
            field,
            &format!("lower bound {} is after upper bound {}", lower, upper),
        )),
        _ => Ok(()),
    }
}

/// Core hours may wrap past midnight, so only an empty span is rejected.
fn check_distinct(field: &str, start: Option<i32>, end: Option<i32>) -> EngineResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start == end => Err(invalid(
            field,
            &format!("start and end are both {}", start),
        )),
        _ => Ok(()),
    }
}

fn check_non_negative(field: &str, value: i32) -> EngineResult<()> {
    if value < 0 {
        return Err(invalid(field, &format!("must not be negative, got {}", value)));
    }
    Ok(())
}
