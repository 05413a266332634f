//! Day calculation orchestrator.
//!
//! Runs the full pipeline for one employee-day:
//!
//! 1. pair the raw bookings, then normalize and round every work booking
//!    (arrivals against the come target, departures against the go target);
//! 2. pair again on the calculated times;
//! 3. total gross, break and net time, apply break rules and net bounds;
//! 4. validate arrival/departure windows and core hours;
//! 5. report unmatched bookings.
//!
//! Domain irregularities never abort the calculation; they are returned as
//! codes in the [`CalculationResult`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::models::{
    AuditStep, Booking, BookingId, Category, CalculationResult, DaySchedule, Direction, ErrorCode,
    PairingResult, WarningCode,
};

use super::breaks::calculate_break_deduction;
use super::pairing::pair_bookings;
use super::rounding::{round_come_time, round_go_time};
use super::time_utils::{MINUTES_PER_DAY, format_minutes};
use super::tolerance::{apply_come_tolerance, apply_go_tolerance};
use super::validation::{validate_core_hours, validate_time_window};

/// One employee-day handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayInput {
    /// The day's schedule configuration.
    pub schedule: DaySchedule,
    /// The day's raw bookings.
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

/// Calculates a [`DayInput`].
pub fn calculate_day(input: &DayInput) -> CalculationResult {
    calculate(&input.schedule, &input.bookings)
}

/// Calculates one employee-day from its schedule and raw bookings.
///
/// The result is a pure function of the inputs, including the relative
/// order of bookings with equal times.
///
/// # Examples
///
/// ```
/// use timecalc_engine::calculation::calculate;
/// use timecalc_engine::models::{Booking, Category, DaySchedule, Direction, ToleranceConfig};
///
/// let schedule = DaySchedule {
///     come_from: Some(480),
///     go_to: Some(1020),
///     tolerance: ToleranceConfig { come_plus: 5, go_minus: 5, ..Default::default() },
///     target_minutes: 480,
///     ..Default::default()
/// };
/// let bookings = vec![
///     Booking::new("w1", 483, Direction::In, Category::Work),
///     Booking::new("b1", 720, Direction::Out, Category::Break),
///     Booking::new("b2", 780, Direction::In, Category::Break),
///     Booking::new("w2", 1017, Direction::Out, Category::Work),
/// ];
///
/// let result = calculate(&schedule, &bookings);
/// assert_eq!(result.gross_minutes, 540);
/// assert_eq!(result.break_minutes, 60);
/// assert_eq!(result.net_minutes, 480);
/// assert_eq!(result.balance_minutes, 0);
/// assert!(result.errors.is_empty());
/// ```
pub fn calculate(schedule: &DaySchedule, bookings: &[Booking]) -> CalculationResult {
    let mut result = CalculationResult {
        target_minutes: schedule.target_minutes,
        ..Default::default()
    };
    let mut audit = AuditLog::default();

    if bookings.is_empty() {
        result.push_warning(WarningCode::NoBookings);
    }

    // Step 1: structural pairing on raw times, then per-booking adjustment
    let raw_pairing = pair_bookings(bookings);
    audit.record(
        "raw_pairing",
        "Raw Booking Pairing",
        json!({ "bookings": bookings.len() }),
        pairing_summary(&raw_pairing),
        format!(
            "{} booking(s) formed {} pair(s) before adjustment",
            bookings.len(),
            raw_pairing.pairs.len()
        ),
    );

    let mut adjusted = Vec::with_capacity(bookings.len());
    let mut changes = Vec::new();
    for booking in bookings {
        let time = calculated_booking_time(booking, schedule);
        if time != booking.time {
            changes.push(json!({
                "booking_id": booking.id,
                "actual": format_minutes(booking.time),
                "calculated": format_minutes(time),
            }));
        }
        result.calculated_times.insert(booking.id.clone(), time);
        adjusted.push(booking.with_time(time));
    }
    audit.record(
        "time_adjustment",
        "Tolerance and Rounding",
        json!({
            "come_target": schedule.schedule_come_target(),
            "go_target": schedule.schedule_go_target(),
            "tolerance": schedule.tolerance,
            "come_rounding": schedule.come_rounding,
            "go_rounding": schedule.go_rounding,
        }),
        json!({ "changed": changes }),
        format!("{} booking time(s) adjusted", changes.len()),
    );

    // Step 2: pair again on calculated times
    let pairing = pair_bookings(&adjusted);
    let topology_changed = pairing.topology() != raw_pairing.topology();
    if topology_changed {
        debug!(
            raw_pairs = raw_pairing.pairs.len(),
            pairs = pairing.pairs.len(),
            "Pairing changed after time adjustment"
        );
    }
    audit.record(
        "final_pairing",
        "Calculated Time Pairing",
        json!({ "bookings": adjusted.len() }),
        pairing_summary(&pairing),
        if topology_changed {
            "Adjusted times changed the pairing".to_string()
        } else {
            "Pairing unchanged by adjusted times".to_string()
        },
    );
    for warning in &pairing.warnings {
        result.push_warning(*warning);
    }

    // Step 3: totals
    result.gross_minutes = pairing.total_minutes(Category::Work);
    let deduction = calculate_break_deduction(&schedule.breaks, &pairing.pairs, result.gross_minutes);
    result.recorded_break_minutes = deduction.recorded_minutes;
    result.auto_break_minutes = deduction.automatic_minutes;
    result.break_minutes = deduction.total_minutes();
    if deduction.automatic_minutes > 0 {
        result.push_warning(WarningCode::AutoBreakDeducted);
    }
    audit.record(
        "break_deduction",
        "Break Deduction",
        json!({
            "gross_minutes": result.gross_minutes,
            "rules": schedule.breaks.len(),
        }),
        json!({
            "recorded_minutes": deduction.recorded_minutes,
            "automatic_minutes": deduction.automatic_minutes,
        }),
        format!(
            "{} recorded + {} automatic break minute(s)",
            deduction.recorded_minutes, deduction.automatic_minutes
        ),
    );

    let uncapped_net = (result.gross_minutes - result.break_minutes).max(0);
    result.net_minutes = uncapped_net;
    if let Some(max) = schedule.max_net_work_time {
        if result.net_minutes > max {
            result.net_minutes = max;
            result.push_warning(WarningCode::MaxTimeReached);
        }
    }
    if let Some(min) = schedule.min_net_work_time {
        if result.net_minutes > 0 && result.net_minutes < min {
            result.push_warning(WarningCode::BelowMinWorkTime);
        }
    }
    result.balance_minutes = result.net_minutes - schedule.target_minutes;
    result.overtime_minutes = result.balance_minutes.max(0);
    result.undertime_minutes = (-result.balance_minutes).max(0);
    audit.record(
        "totals",
        "Gross, Break and Net Time",
        json!({
            "gross_minutes": result.gross_minutes,
            "break_minutes": result.break_minutes,
            "min_net_work_time": schedule.min_net_work_time,
            "max_net_work_time": schedule.max_net_work_time,
            "target_minutes": schedule.target_minutes,
        }),
        json!({
            "net_minutes": result.net_minutes,
            "balance_minutes": result.balance_minutes,
        }),
        format!(
            "net {} of target {} (uncapped {})",
            format_minutes(result.net_minutes),
            format_minutes(schedule.target_minutes),
            format_minutes(uncapped_net)
        ),
    );

    // Step 4: windows and core hours on calculated times
    result.first_come = first_come(&adjusted);
    result.last_go = last_go(&adjusted, &pairing);
    let mut window_errors = Vec::new();
    if let Some(come) = result.first_come {
        window_errors.extend(validate_time_window(
            come,
            schedule.come_from,
            schedule.come_to,
            ErrorCode::EarlyCome,
            ErrorCode::LateCome,
        ));
    }
    if let Some(go) = result.last_go {
        let anchor = come_anchor(schedule);
        let go_from = lift_before(schedule.go_from, anchor);
        let go_to = lift_before(schedule.go_to, anchor);
        let overnight = go_to != schedule.go_to || go_from != schedule.go_from;
        let go = if overnight {
            lift_before(Some(go), anchor).unwrap_or(go)
        } else {
            go
        };
        window_errors.extend(validate_time_window(
            go,
            go_from,
            go_to,
            ErrorCode::EarlyGo,
            ErrorCode::LateGo,
        ));
    }
    let core_end = match (schedule.core_start, schedule.core_end) {
        (Some(start), Some(end)) if end < start => Some(end + MINUTES_PER_DAY),
        (_, end) => end,
    };
    let core_warnings =
        validate_core_hours(result.first_come, result.last_go, schedule.core_start, core_end);
    audit.record(
        "window_validation",
        "Time Window and Core Hours",
        json!({
            "first_come": result.first_come,
            "last_go": result.last_go,
            "come_window": [schedule.come_from, schedule.come_to],
            "go_window": [schedule.go_from, schedule.go_to],
            "core_hours": [schedule.core_start, schedule.core_end],
        }),
        json!({ "errors": window_errors, "warnings": core_warnings }),
        format!(
            "{} window violation(s), {} core-hour finding(s)",
            window_errors.len(),
            core_warnings.len()
        ),
    );
    for code in window_errors {
        result.push_error(code);
    }
    for code in core_warnings {
        result.push_warning(code);
    }

    // Step 5: unmatched bookings
    let unpaired_in: HashSet<&BookingId> = pairing.unpaired_in_ids.iter().collect();
    let unpaired_out: HashSet<&BookingId> = pairing.unpaired_out_ids.iter().collect();
    for booking in &adjusted {
        let unpaired = match booking.direction {
            Direction::In => unpaired_in.contains(&booking.id),
            Direction::Out => unpaired_out.contains(&booking.id),
        };
        if !unpaired {
            continue;
        }
        result.push_error(match (booking.category, booking.direction) {
            (Category::Work, Direction::In) => ErrorCode::MissingGo,
            (Category::Work, Direction::Out) => ErrorCode::MissingCome,
            (Category::Break, _) => ErrorCode::UnpairedBooking,
        });
    }

    result.pairs = pairing.pairs;
    result.unpaired_in_ids = pairing.unpaired_in_ids;
    result.unpaired_out_ids = pairing.unpaired_out_ids;
    result.audit_trace = audit.steps;

    if result.has_errors() {
        warn!(
            bookings = bookings.len(),
            errors = ?result.errors,
            warnings = ?result.warnings,
            "Day calculated with errors"
        );
    } else {
        debug!(
            bookings = bookings.len(),
            gross = result.gross_minutes,
            net = result.net_minutes,
            warnings = ?result.warnings,
            "Day calculated"
        );
    }

    result
}

/// Tolerance then rounding for work bookings; breaks pass through.
fn calculated_booking_time(booking: &Booking, schedule: &DaySchedule) -> i32 {
    match (booking.category, booking.direction) {
        (Category::Work, Direction::In) => {
            let normalized = apply_come_tolerance(
                booking.time,
                schedule.schedule_come_target(),
                &schedule.tolerance,
            );
            round_come_time(normalized, schedule)
        }
        (Category::Work, Direction::Out) => {
            let normalized =
                apply_go_tolerance(booking.time, schedule.schedule_go_target(), &schedule.tolerance);
            round_go_time(normalized, schedule)
        }
        (Category::Break, _) => booking.time,
    }
}

fn first_come(adjusted: &[Booking]) -> Option<i32> {
    adjusted
        .iter()
        .filter(|b| b.category == Category::Work && b.direction == Direction::In)
        .map(|b| b.time)
        .min()
}

/// Latest work departure: pair ends (normalized past midnight) and
/// departures that found no arrival.
fn last_go(adjusted: &[Booking], pairing: &PairingResult) -> Option<i32> {
    let unpaired_out: HashSet<&BookingId> = pairing.unpaired_out_ids.iter().collect();
    let pair_ends = pairing.pairs_of(Category::Work).map(|p| p.end_time());
    let lone_outs = adjusted
        .iter()
        .filter(|b| b.category == Category::Work && unpaired_out.contains(&b.id))
        .map(|b| b.time);
    pair_ends.chain(lone_outs).max()
}

/// Earliest configured point of the arrival window.
fn come_anchor(schedule: &DaySchedule) -> Option<i32> {
    [schedule.come_from, schedule.come_target, schedule.come_to]
        .into_iter()
        .flatten()
        .min()
}

/// Moves a time onto the next day when it lies before the schedule's
/// arrival window. Only the schedule decides this, never the actual arrival.
fn lift_before(time: Option<i32>, anchor: Option<i32>) -> Option<i32> {
    match (time, anchor) {
        (Some(time), Some(anchor)) if time < anchor => Some(time + MINUTES_PER_DAY),
        (time, _) => time,
    }
}

fn pairing_summary(pairing: &PairingResult) -> serde_json::Value {
    let pairs: Vec<serde_json::Value> = pairing
        .pairs
        .iter()
        .map(|p| {
            json!({
                "category": p.category,
                "in": p.in_booking.id,
                "out": p.out_booking.id,
                "duration": p.duration,
            })
        })
        .collect();
    json!({
        "pairs": pairs,
        "unpaired_in": pairing.unpaired_in_ids,
        "unpaired_out": pairing.unpaired_out_ids,
        "warnings": pairing.warnings,
    })
}

#[derive(Default)]
struct AuditLog {
    steps: Vec<AuditStep>,
}

impl AuditLog {
    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }
}
