//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most analysis DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Analysis
    AnalysisResponse, DescriptiveStats, LocationInfo, OutcomeStatus, PercentileSet,
    ProbabilitySummary, RiskLevel, TrendConfidence, TrendDirection, TrendSummary,
    VariableAnalysis, VariableOutcome,
    // Export
    ExportDocument,
    // Variables
    VariableInfo, VariableListResponse,
};
pub use crate::models::AnalysisRequest;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Whether the result cache is enabled
    pub cache_enabled: bool,
}
