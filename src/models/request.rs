//! Analysis request parsing and validation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::api::GeographicLocation;
use crate::config::AnalysisSettings;

use super::sample::{SampleQuery, TargetDate};
use super::variable::WeatherVariable;

/// Upper bound on date-window pooling, to keep sample counts bounded.
const MAX_WINDOW_DAYS: u32 = 30;

/// Raw analysis request as received from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Display name for the location (defaults to formatted coordinates)
    #[serde(default)]
    pub location_name: Option<String>,
    /// Target date: `MM-DD` or a full date whose year is ignored
    pub date: String,
    /// Requested variables by wire or display name
    pub variables: Vec<String>,
    /// Per-variable exceedance thresholds (catalog defaults apply otherwise)
    #[serde(default)]
    pub thresholds: HashMap<String, f64>,
    /// Years of history (configured default applies when absent)
    #[serde(default)]
    pub years: Option<u32>,
    /// Days pooled on each side of the target date
    #[serde(default)]
    pub window_days: Option<u32>,
    /// Fixed seed for reproducible sample generation
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A request that passed validation, with defaults resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRequest {
    pub location: GeographicLocation,
    pub location_name: String,
    pub target: TargetDate,
    pub variables: Vec<WeatherVariable>,
    pub thresholds: BTreeMap<WeatherVariable, f64>,
    pub years: u32,
    pub window_days: u32,
    pub seed: Option<u64>,
}

impl AnalysisRequest {
    /// Validate the request against the configured bounds.
    ///
    /// Every violation is collected so the caller can report them all at
    /// once rather than one per round-trip.
    pub fn validate(&self, settings: &AnalysisSettings) -> Result<ValidatedRequest, Vec<String>> {
        let mut errors = Vec::new();

        // Check latitude and longitude independently so both violations are
        // reported together.
        if !(-90.0..=90.0).contains(&self.latitude) {
            errors.push("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            errors.push("Longitude must be between -180 and 180 degrees".to_string());
        }

        let target = match TargetDate::parse(&self.date) {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let mut variables: Vec<WeatherVariable> = Vec::new();
        if self.variables.is_empty() {
            errors.push("At least one weather variable must be selected".to_string());
        }
        for raw in &self.variables {
            match WeatherVariable::from_str(raw) {
                Ok(variable) => {
                    if !variables.contains(&variable) {
                        variables.push(variable);
                    }
                }
                Err(e) => errors.push(e),
            }
        }

        let mut thresholds: BTreeMap<WeatherVariable, f64> = BTreeMap::new();
        for (key, value) in &self.thresholds {
            match WeatherVariable::from_str(key) {
                Ok(variable) => {
                    if !value.is_finite() {
                        errors.push(format!("Threshold for {} must be a finite number", variable));
                    } else {
                        thresholds.insert(variable, *value);
                    }
                }
                Err(e) => errors.push(e),
            }
        }
        for variable in &variables {
            thresholds
                .entry(*variable)
                .or_insert_with(|| variable.default_threshold());
        }

        let years = self.years.unwrap_or(settings.default_years);
        if years < settings.min_years || years > settings.max_years {
            errors.push(format!(
                "Years of history must be between {} and {}",
                settings.min_years, settings.max_years
            ));
        }

        let window_days = self.window_days.unwrap_or(settings.date_window);
        if window_days > MAX_WINDOW_DAYS {
            errors.push(format!(
                "Date window must be at most {} days",
                MAX_WINDOW_DAYS
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let location =
            GeographicLocation::new(self.latitude, self.longitude).map_err(|e| vec![e])?;
        let target = target.ok_or_else(|| vec!["invalid date".to_string()])?;

        let location_name = self
            .location_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| location.display());

        Ok(ValidatedRequest {
            location,
            location_name,
            target,
            variables,
            thresholds,
            years,
            window_days,
            seed: self.seed,
        })
    }
}

impl ValidatedRequest {
    /// Build the sample query for one of the requested variables.
    pub fn query_for(&self, variable: WeatherVariable) -> SampleQuery {
        SampleQuery {
            variable,
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            target: self.target,
            years: self.years,
            window_days: self.window_days,
            seed: self.seed,
        }
    }

    /// Resolved exceedance threshold for a variable.
    pub fn threshold_for(&self, variable: WeatherVariable) -> f64 {
        self.thresholds
            .get(&variable)
            .copied()
            .unwrap_or_else(|| variable.default_threshold())
    }
}
