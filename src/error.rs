//! Error types for the time-calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! They cover the edges of the engine only: loading day-plan configuration
//! and the optional input-domain checks callers run before a calculation.
//! Irregularities inside a day (unpaired bookings, window violations) are
//! never errors of this kind; they are reported as codes in the
//! [`CalculationResult`](crate::models::CalculationResult).

use thiserror::Error;

/// The main error type for the time-calculation engine.
///
/// # Example
///
/// ```
/// use timecalc_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/plans".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/plans");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file or directory was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No day plan with the requested code was loaded.
    #[error("Day plan not found: {code}")]
    DayPlanNotFound {
        /// The day plan code that was not found.
        code: String,
    },

    /// A booking is outside the input domain the engine accepts.
    #[error("Invalid booking '{booking_id}': {message}")]
    InvalidBooking {
        /// The ID of the offending booking.
        booking_id: String,
        /// A description of what made the booking invalid.
        message: String,
    },

    /// A day schedule contained inconsistent settings.
    #[error("Invalid schedule field '{field}': {message}")]
    InvalidSchedule {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
