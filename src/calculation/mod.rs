//! Calculation logic for the time-calculation engine.
//!
//! This module contains the daily pipeline and its building blocks:
//! minute-of-day arithmetic, booking pairing, tolerance normalization,
//! rounding, break deduction, window and core-hour validation, the day
//! calculator that sequences them, and parallel batch calculation.

mod batch;
mod breaks;
mod day_calculator;
mod pairing;
mod rounding;
mod time_utils;
mod tolerance;
mod validation;

pub use batch::calculate_batch;
pub use breaks::{BreakDeduction, calculate_break_deduction};
pub use day_calculator::{DayInput, calculate, calculate_day};
pub use pairing::pair_bookings;
pub use rounding::{round_come_time, round_go_time, round_time};
pub use time_utils::{
    MINUTES_PER_DAY, format_minutes, interval_duration, minutes_to_hours, minutes_to_time,
    normalize_cross_midnight, overlap_minutes, parse_hhmm, time_to_minutes,
};
pub use tolerance::{apply_come_tolerance, apply_go_tolerance};
pub use validation::{validate_bookings, validate_core_hours, validate_time_window};
