use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::{Sample, WeatherVariable};

// =========================================================
// Analysis types
// =========================================================

/// Descriptive statistics for one variable's sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Percentile values at the standard report levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileSet {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// Confidence banding for a trend estimate, derived from R².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendConfidence {
    /// Fewer than two samples, or zero variance: the fit is undefined
    Insufficient,
    Weak,
    Moderate,
    Strong,
}

/// Direction label for the long-term trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Linear trend summary for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// OLS slope in units per year
    pub slope_per_year: f64,
    /// OLS slope scaled to units per decade
    pub slope_per_decade: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub direction: TrendDirection,
    pub confidence: TrendConfidence,
}

/// Risk banding derived from the exceedance probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Threshold exceedance summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySummary {
    pub threshold: f64,
    /// Percentage of samples strictly above the threshold (0-100)
    pub exceedance_probability: f64,
    pub exceed_count: usize,
    pub total_count: usize,
    pub risk_level: RiskLevel,
}

/// Complete analysis result for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableAnalysis {
    pub variable: WeatherVariable,
    pub units: String,
    pub data_source: String,
    pub statistics: DescriptiveStats,
    pub percentiles: PercentileSet,
    pub probability: ProbabilitySummary,
    pub trend: TrendSummary,
    /// Natural-language summary of the result
    pub interpretation: String,
    /// Raw (year, value) samples backing the statistics
    pub samples: Vec<Sample>,
}

/// Per-variable outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    NoData,
}

/// Outcome of analyzing one variable within a request.
///
/// A variable with no available samples reports `no_data` without affecting
/// its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableOutcome {
    pub variable: WeatherVariable,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<VariableAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VariableOutcome {
    pub fn ok(analysis: VariableAnalysis) -> Self {
        Self {
            variable: analysis.variable,
            status: OutcomeStatus::Ok,
            analysis: Some(analysis),
            message: None,
        }
    }

    pub fn no_data(variable: WeatherVariable, message: impl Into<String>) -> Self {
        Self {
            variable,
            status: OutcomeStatus::NoData,
            analysis: None,
            message: Some(message.into()),
        }
    }
}

/// Location echo carried in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Complete response for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub location: LocationInfo,
    /// Target date in MM-DD form
    pub date: String,
    pub years_analyzed: u32,
    pub window_days: u32,
    pub variables: Vec<VariableOutcome>,
    /// Dataset label per analyzed variable
    pub data_sources: BTreeMap<String, String>,
}

impl AnalysisResponse {
    /// Look up the outcome for a variable, if it was part of the request.
    pub fn outcome(&self, variable: WeatherVariable) -> Option<&VariableOutcome> {
        self.variables.iter().find(|o| o.variable == variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_outcome_ok() {
        let analysis = VariableAnalysis {
            variable: WeatherVariable::Temperature,
            units: "°F".to_string(),
            data_source: "MERRA-2".to_string(),
            statistics: DescriptiveStats {
                count: 3,
                mean: 70.0,
                median: 70.0,
                std_dev: 5.0,
                min: 65.0,
                max: 75.0,
            },
            percentiles: PercentileSet {
                p10: 66.0,
                p25: 67.5,
                p50: 70.0,
                p75: 72.5,
                p90: 74.0,
            },
            probability: ProbabilitySummary {
                threshold: 90.0,
                exceedance_probability: 0.0,
                exceed_count: 0,
                total_count: 3,
                risk_level: RiskLevel::Low,
            },
            trend: TrendSummary {
                slope_per_year: 0.1,
                slope_per_decade: 1.0,
                intercept: 69.9,
                r_squared: 0.8,
                direction: TrendDirection::Increasing,
                confidence: TrendConfidence::Strong,
            },
            interpretation: "summary".to_string(),
            samples: vec![],
        };

        let outcome = VariableOutcome::ok(analysis);
        assert_eq!(outcome.status, OutcomeStatus::Ok);
        assert!(outcome.analysis.is_some());
        assert!(outcome.message.is_none());
    }

    #[test]
    fn test_variable_outcome_no_data() {
        let outcome = VariableOutcome::no_data(WeatherVariable::Humidity, "no samples");
        assert_eq!(outcome.status, OutcomeStatus::NoData);
        assert!(outcome.analysis.is_none());
        assert_eq!(outcome.message.as_deref(), Some("no samples"));
    }

    #[test]
    fn test_outcome_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OutcomeStatus::NoData).unwrap(),
            "\"no_data\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLevel::Moderate).unwrap(),
            "\"moderate\""
        );
        assert_eq!(
            serde_json::to_string(&TrendConfidence::Insufficient).unwrap(),
            "\"insufficient\""
        );
    }
}
