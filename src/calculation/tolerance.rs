//! Tolerance normalization.
//!
//! Snaps actual arrival and departure times onto the expected schedule time
//! when they fall within the configured grace windows. A deviation exactly
//! equal to the grace window is still forgiven.

use crate::models::ToleranceConfig;

/// Normalizes an arrival time against the expected arrival.
///
/// Late arrivals within `come_plus` and early arrivals within `come_minus`
/// are moved to `expected_time`. Without an expected time the actual time is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::apply_come_tolerance;
/// use timecalc_engine::models::ToleranceConfig;
///
/// let config = ToleranceConfig { come_plus: 10, come_minus: 10, ..Default::default() };
///
/// assert_eq!(apply_come_tolerance(490, Some(480), &config), 480);
/// assert_eq!(apply_come_tolerance(491, Some(480), &config), 491);
/// assert_eq!(apply_come_tolerance(475, None, &config), 475);
/// ```
pub fn apply_come_tolerance(
    actual_time: i32,
    expected_time: Option<i32>,
    config: &ToleranceConfig,
) -> i32 {
    snap(actual_time, expected_time, config.come_plus, config.come_minus)
}

/// Normalizes a departure time against the expected departure.
///
/// Early departures within `go_minus` and late departures within `go_plus`
/// are moved to `expected_time`.
pub fn apply_go_tolerance(
    actual_time: i32,
    expected_time: Option<i32>,
    config: &ToleranceConfig,
) -> i32 {
    snap(actual_time, expected_time, config.go_plus, config.go_minus)
}

fn snap(actual_time: i32, expected_time: Option<i32>, late_grace: i32, early_grace: i32) -> i32 {
    let Some(expected) = expected_time else {
        return actual_time;
    };
    let forgiven_late = actual_time > expected && actual_time - expected <= late_grace;
    let forgiven_early = actual_time < expected && expected - actual_time <= early_grace;
    if forgiven_late || forgiven_early {
        expected
    } else {
        actual_time
    }
}
