//! Configuration loading functionality.
//!
//! This module provides the [`ScheduleLoader`] type for loading day plans
//! from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::DayPlan;

/// Loads and provides access to day plans.
///
/// Every `*.yaml` file in the configuration directory holds one day plan:
/// ```text
/// config/day_plans/
/// ├── flex_office.yaml
/// ├── fixed_early.yaml
/// └── night_shift.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use timecalc_engine::calculation::calculate;
/// use timecalc_engine::config::ScheduleLoader;
///
/// let loader = ScheduleLoader::load("./config/day_plans")?;
/// let plan = loader.get_day_plan("flex_office")?;
/// let result = calculate(&plan.schedule, &[]);
/// println!("{}: {} warning(s)", plan.name, result.warnings.len());
/// # Ok::<(), timecalc_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleLoader {
    plans: BTreeMap<String, DayPlan>,
}

impl ScheduleLoader {
    /// Loads every day plan in the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ScheduleLoader` on success, or an error if:
    /// - The directory is missing or contains no YAML files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any schedule fails [`DaySchedule::validate`](crate::models::DaySchedule::validate)
    /// - Two files declare the same plan code
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let dir_str = path.display().to_string();

        let entries = fs::read_dir(path).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let file = entry.path();
            if file.extension().is_some_and(|ext| ext == "yaml") {
                files.push(file);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no day plan files found)", dir_str),
            });
        }

        let mut plans = Vec::with_capacity(files.len());
        for file in &files {
            plans.push(Self::load_yaml::<DayPlan>(file)?);
        }

        let loader = Self::from_plans(plans)?;
        debug!(path = %dir_str, plans = loader.plans.len(), "Loaded day plans");
        Ok(loader)
    }

    /// Builds a loader from plans already in memory, validating each one.
    pub fn from_plans(plans: Vec<DayPlan>) -> EngineResult<Self> {
        let mut by_code = BTreeMap::new();
        for plan in plans {
            plan.schedule
                .validate()
                .map_err(|err| match err {
                    EngineError::InvalidSchedule { field, message } => {
                        EngineError::InvalidSchedule {
                            field: format!("{}.{}", plan.code, field),
                            message,
                        }
                    }
                    other => other,
                })?;
            if by_code.contains_key(&plan.code) {
                return Err(EngineError::InvalidSchedule {
                    field: "code".to_string(),
                    message: format!("duplicate day plan code '{}'", plan.code),
                });
            }
            by_code.insert(plan.code.clone(), plan);
        }
        Ok(Self { plans: by_code })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a day plan by its code.
    ///
    /// Returns [`EngineError::DayPlanNotFound`] for unknown codes.
    pub fn get_day_plan(&self, code: &str) -> EngineResult<&DayPlan> {
        self.plans
            .get(code)
            .ok_or_else(|| EngineError::DayPlanNotFound {
                code: code.to_string(),
            })
    }

    /// All loaded plans, ordered by code.
    pub fn day_plans(&self) -> impl Iterator<Item = &DayPlan> {
        self.plans.values()
    }
}
