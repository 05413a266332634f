//! Configuration types for day plans.
//!
//! Day plans are deserialized from YAML files. The schedule fields sit at
//! the top level of each file next to the plan's identifying fields.

use serde::Deserialize;

use crate::models::DaySchedule;

/// A named, reusable day schedule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DayPlan {
    /// Unique code used to look the plan up (e.g., "flex_office").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// The schedule applied to days using this plan.
    #[serde(flatten)]
    pub schedule: DaySchedule,
}
