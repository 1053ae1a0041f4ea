use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::analysis::{PercentileSet, TrendConfidence, TrendDirection};

// =========================================================
// Export document types (JSON report)
// =========================================================

/// Coordinates block of the export header.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Header metadata for an exported analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportAnalysisInfo {
    pub location: String,
    pub coordinates: ExportCoordinates,
    /// Target date in MM-DD form
    pub date: String,
    pub years_analyzed: u32,
    pub generated_at: DateTime<Utc>,
    pub analysis_id: Uuid,
}

/// Five-number summary block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Threshold analysis block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportThresholdAnalysis {
    pub threshold: f64,
    pub probability_exceeding: f64,
    pub units: String,
}

/// Trend value block (per-decade change in display units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTrendValue {
    pub value: f64,
    pub units_per_decade: String,
}

/// Per-variable statistics section of the export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportVariableStats {
    pub summary: ExportSummary,
    pub percentiles: PercentileSet,
    pub threshold_analysis: ExportThresholdAnalysis,
    pub trend: ExportTrendValue,
    pub data_source: String,
}

/// Per-variable trend detail section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTrendDetail {
    pub direction: TrendDirection,
    pub slope: f64,
    pub r_squared: f64,
    pub confidence: TrendConfidence,
}

/// Complete JSON export document.
///
/// Numeric fields keep full precision so a parse of the exported document
/// reproduces every value exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub analysis_info: ExportAnalysisInfo,
    /// Keyed by variable display name
    pub statistics: BTreeMap<String, ExportVariableStats>,
    pub trends: BTreeMap<String, ExportTrendDetail>,
    pub data_sources: BTreeMap<String, String>,
}
