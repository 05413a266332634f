//! Day-plan configuration loading.
//!
//! This module loads reusable day plans from YAML files. Each plan carries
//! a [`DaySchedule`](crate::models::DaySchedule) that callers pass to the
//! day calculator.
//!
//! # Example
//!
//! ```no_run
//! use timecalc_engine::config::ScheduleLoader;
//!
//! let loader = ScheduleLoader::load("./config/day_plans").unwrap();
//! for plan in loader.day_plans() {
//!     println!("{}: {}", plan.code, plan.name);
//! }
//! ```

mod loader;
mod types;

pub use loader::ScheduleLoader;
pub use types::DayPlan;
