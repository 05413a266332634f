//! Calculation result models.
//!
//! This module contains the [`CalculationResult`] produced for one
//! employee-day, the closed [`ErrorCode`] / [`WarningCode`] taxonomies, and
//! the [`AuditStep`] entries recording each stage of the pipeline.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingPair};
use crate::calculation::minutes_to_hours;

/// Day-level findings that block an unreviewed payout.
///
/// # Example
///
/// ```
/// use timecalc_engine::models::ErrorCode;
///
/// assert_eq!(ErrorCode::MissingGo.as_str(), "MISSING_GO");
/// assert_eq!(serde_json::to_string(&ErrorCode::MissingGo).unwrap(), "\"MISSING_GO\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A work `out` has no matching `in`.
    MissingCome,
    /// A work `in` has no matching `out`.
    MissingGo,
    /// A break booking could not be matched.
    UnpairedBooking,
    /// Arrival before the allowed arrival window.
    EarlyCome,
    /// Arrival after the allowed arrival window.
    LateCome,
    /// Departure before the allowed departure window.
    EarlyGo,
    /// Departure after the allowed departure window.
    LateGo,
}

impl ErrorCode {
    /// The stable external code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingCome => "MISSING_COME",
            ErrorCode::MissingGo => "MISSING_GO",
            ErrorCode::UnpairedBooking => "UNPAIRED_BOOKING",
            ErrorCode::EarlyCome => "EARLY_COME",
            ErrorCode::LateCome => "LATE_COME",
            ErrorCode::EarlyGo => "EARLY_GO",
            ErrorCode::LateGo => "LATE_GO",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Informational findings surfaced for human review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// A pair spans midnight.
    CrossMidnight,
    /// Required core hours were not covered.
    CoreHoursNotCovered,
    /// The day has no bookings at all.
    NoBookings,
    /// A configured break was deducted without a matching booking.
    AutoBreakDeducted,
    /// Net time was capped at the configured maximum.
    MaxTimeReached,
    /// Net time is below the configured minimum.
    BelowMinWorkTime,
}

impl WarningCode {
    /// The stable external code.
    pub fn as_str(self) -> &'static str {
        match self {
            WarningCode::CrossMidnight => "CROSS_MIDNIGHT",
            WarningCode::CoreHoursNotCovered => "CORE_HOURS_NOT_COVERED",
            WarningCode::NoBookings => "NO_BOOKINGS",
            WarningCode::AutoBreakDeducted => "AUTO_BREAK_DEDUCTED",
            WarningCode::MaxTimeReached => "MAX_TIME_REACHED",
            WarningCode::BelowMinWorkTime => "BELOW_MIN_WORK_TIME",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Stable identifier of the pipeline stage.
    pub rule_id: String,
    /// Human-readable name of the stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of calculating one employee-day.
///
/// Produced fresh per day. Collaborators aggregating across days consume it
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Tolerance-adjusted and rounded time of every booking.
    pub calculated_times: BTreeMap<BookingId, i32>,
    /// Final pairs formed from the calculated times.
    pub pairs: Vec<BookingPair>,
    /// Bookings with direction `in` left unmatched.
    pub unpaired_in_ids: Vec<BookingId>,
    /// Bookings with direction `out` left unmatched.
    pub unpaired_out_ids: Vec<BookingId>,
    /// Earliest calculated work arrival.
    pub first_come: Option<i32>,
    /// Latest calculated work departure, past 1439 for cross-midnight shifts.
    pub last_go: Option<i32>,
    /// Sum of all work pair durations.
    pub gross_minutes: i32,
    /// Break minutes taken from break pairs.
    pub recorded_break_minutes: i32,
    /// Break minutes deducted by configured break rules.
    pub auto_break_minutes: i32,
    /// Total break minutes (recorded plus automatic).
    pub break_minutes: i32,
    /// Gross minus break, after net-time bounds.
    pub net_minutes: i32,
    /// Target minutes of the day schedule.
    pub target_minutes: i32,
    /// Net minus target.
    pub balance_minutes: i32,
    /// Positive part of the balance.
    pub overtime_minutes: i32,
    /// Negative part of the balance, as a positive number.
    pub undertime_minutes: i32,
    /// Error codes, de-duplicated, in first-seen order.
    pub errors: Vec<ErrorCode>,
    /// Warning codes, de-duplicated, in first-seen order.
    pub warnings: Vec<WarningCode>,
    /// Stage-by-stage record of the calculation.
    pub audit_trace: Vec<AuditStep>,
}

impl CalculationResult {
    /// Whether the day carries any error code.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The calculated time of a booking, if it was part of the input.
    pub fn calculated_time(&self, id: &BookingId) -> Option<i32> {
        self.calculated_times.get(id).copied()
    }

    /// Net time in decimal hours.
    pub fn net_hours(&self) -> Decimal {
        minutes_to_hours(self.net_minutes)
    }

    /// Balance against target in decimal hours.
    pub fn balance_hours(&self) -> Decimal {
        minutes_to_hours(self.balance_minutes)
    }

    pub(crate) fn push_error(&mut self, code: ErrorCode) {
        if !self.errors.contains(&code) {
            self.errors.push(code);
        }
    }

    pub(crate) fn push_warning(&mut self, code: WarningCode) {
        if !self.warnings.contains(&code) {
            self.warnings.push(code);
        }
    }
}
