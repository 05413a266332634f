//! Daily time-calculation engine for workforce time tracking.
//!
//! This crate turns the raw clock events ("bookings") of one employee-day
//! into paired work and break intervals, tolerance-adjusted and rounded
//! times, and gross/break/net totals validated against the day's schedule.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
