//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{AnalysisRequest, AnalysisResponse, HealthResponse, VariableListResponse};
use super::error::AppError;
use super::state::AppState;
use crate::services::{analysis, export};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        cache_enabled: state.cache.is_enabled(),
    }))
}

// =============================================================================
// Variable Catalog
// =============================================================================

/// GET /v1/variables
///
/// List the supported weather variables with units, data sources, and
/// default thresholds for the frontend's variable picker.
pub async fn list_variables() -> HandlerResult<VariableListResponse> {
    Ok(Json(VariableListResponse::catalog()))
}

// =============================================================================
// Analysis
// =============================================================================

/// POST /v1/analyses
///
/// Run the probability analysis for every requested variable and return the
/// full response, serving repeated seeded requests from the TTL cache.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> HandlerResult<AnalysisResponse> {
    let response = analysis::analyze_with_cache(
        &state.config.analysis,
        state.source.as_ref(),
        &state.cache,
        &request,
    )
    .await?;

    Ok(Json(response))
}

// =============================================================================
// Export Endpoints
// =============================================================================

/// POST /v1/analyses/export/csv
///
/// Run the analysis and return the per-variable summary CSV.
pub async fn export_summary_csv(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let response = run_analysis(&state, &request).await?;
    let body = export::summary_csv(&response)?;
    Ok(csv_attachment("weather_analysis.csv", body))
}

/// POST /v1/analyses/export/timeseries
///
/// Run the analysis and return the raw time-series CSV with a trailer of
/// summary statistics.
pub async fn export_time_series_csv(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let response = run_analysis(&state, &request).await?;
    let body = export::time_series_csv(&response)?;
    Ok(csv_attachment("weather_time_series.csv", body))
}

/// POST /v1/analyses/export/json
///
/// Run the analysis and return the structured JSON report document.
pub async fn export_json_document(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let response = run_analysis(&state, &request).await?;
    let body = export::export_json(&response)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"weather_analysis.json\"",
            ),
        ],
        body,
    )
        .into_response())
}

async fn run_analysis(
    state: &AppState,
    request: &AnalysisRequest,
) -> Result<AnalysisResponse, AppError> {
    Ok(analysis::analyze_with_cache(
        &state.config.analysis,
        state.source.as_ref(),
        &state.cache,
        request,
    )
    .await?)
}

fn csv_attachment(filename: &str, body: String) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
