//! Core data models for the time-calculation engine.
//!
//! All models are value-like and transient: built at the start of one day's
//! calculation and dropped once the result has been handed to the caller.

mod booking;
mod calculation_result;
mod day_schedule;
mod pairing;

pub use booking::{Booking, BookingId, Category, Direction};
pub use calculation_result::{AuditStep, CalculationResult, ErrorCode, WarningCode};
pub use day_schedule::{
    BreakConfig, BreakType, DaySchedule, RoundingConfig, RoundingMode, ToleranceConfig,
};
pub use pairing::{BookingPair, PairingResult};
