//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::analysis::AnalysisResponse;
pub use crate::routes::analysis::DescriptiveStats;
pub use crate::routes::analysis::LocationInfo;
pub use crate::routes::analysis::OutcomeStatus;
pub use crate::routes::analysis::PercentileSet;
pub use crate::routes::analysis::ProbabilitySummary;
pub use crate::routes::analysis::RiskLevel;
pub use crate::routes::analysis::TrendConfidence;
pub use crate::routes::analysis::TrendDirection;
pub use crate::routes::analysis::TrendSummary;
pub use crate::routes::analysis::VariableAnalysis;
pub use crate::routes::analysis::VariableOutcome;
pub use crate::routes::export::ExportAnalysisInfo;
pub use crate::routes::export::ExportCoordinates;
pub use crate::routes::export::ExportDocument;
pub use crate::routes::export::ExportSummary;
pub use crate::routes::export::ExportThresholdAnalysis;
pub use crate::routes::export::ExportTrendDetail;
pub use crate::routes::export::ExportTrendValue;
pub use crate::routes::export::ExportVariableStats;
pub use crate::routes::variables::VariableInfo;
pub use crate::routes::variables::VariableListResponse;

pub use crate::models::{Sample, SampleQuery, TargetDate, WeatherVariable};

use serde::{Deserialize, Serialize};

/// Geographic location (latitude, longitude).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeographicLocation {
    /// Latitude in decimal degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180 to 180)
    pub longitude: f64,
}

impl GeographicLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err("Latitude must be between -90 and 90 degrees".to_string());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err("Longitude must be between -180 and 180 degrees".to_string());
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format for display, e.g. `39.8283°N, 98.5795°W`.
    pub fn display(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let lon_dir = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            lat_dir,
            self.longitude.abs(),
            lon_dir
        )
    }
}
