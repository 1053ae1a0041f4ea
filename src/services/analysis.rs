//! Analysis orchestration.
//!
//! Validates the incoming request, fetches per-variable samples from the
//! active source, runs the statistics calculator, and assembles the
//! response. A variable with no data reports a `no_data` outcome without
//! affecting its siblings.

use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::api::{
    AnalysisResponse, LocationInfo, ProbabilitySummary, TrendSummary, VariableAnalysis,
    VariableOutcome,
};
use crate::config::AnalysisSettings;
use crate::models::{AnalysisRequest, Sample, ValidatedRequest, WeatherVariable};
use crate::sources::{SampleSource, SourceError};

use super::cache::ResultCache;
use super::interpretation;
use super::statistics;

/// Error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The request failed validation; every violation is listed.
    #[error("Invalid request: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),

    /// No samples are available for a variable.
    #[error("No data available for {variable}")]
    NoData { variable: WeatherVariable },

    /// The sample source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Validate a raw request against the configured bounds.
pub fn validate_request(
    settings: &AnalysisSettings,
    request: &AnalysisRequest,
) -> Result<ValidatedRequest, AnalysisError> {
    request
        .validate(settings)
        .map_err(AnalysisError::InvalidRequest)
}

/// Run the full analysis for a raw request.
pub async fn analyze_request(
    settings: &AnalysisSettings,
    source: &dyn SampleSource,
    request: &AnalysisRequest,
) -> Result<AnalysisResponse, AnalysisError> {
    let validated = validate_request(settings, request)?;
    analyze_validated(source, &validated).await
}

/// Run the analysis with TTL memoization.
///
/// Only seeded requests are served from the cache: without a seed two
/// identical requests legitimately produce different samples, so a cached
/// copy would change observable behavior, not just latency.
pub async fn analyze_with_cache(
    settings: &AnalysisSettings,
    source: &dyn SampleSource,
    cache: &ResultCache,
    request: &AnalysisRequest,
) -> Result<AnalysisResponse, AnalysisError> {
    let validated = validate_request(settings, request)?;

    if validated.seed.is_none() || !cache.is_enabled() {
        return analyze_validated(source, &validated).await;
    }

    let key = ResultCache::fingerprint(&validated);
    if let Some(hit) = cache.get(&key) {
        tracing::debug!(fingerprint = %key, "analysis cache hit");
        return Ok(hit);
    }

    let response = analyze_validated(source, &validated).await?;
    cache.insert(key, response.clone());
    Ok(response)
}

/// Run the full analysis for an already-validated request.
pub async fn analyze_validated(
    source: &dyn SampleSource,
    request: &ValidatedRequest,
) -> Result<AnalysisResponse, AnalysisError> {
    let mut outcomes = Vec::with_capacity(request.variables.len());
    let mut data_sources = BTreeMap::new();

    for variable in &request.variables {
        let variable = *variable;
        let query = request.query_for(variable);
        let samples = source.fetch_samples(&query).await?;
        tracing::debug!(
            variable = %variable,
            sample_count = samples.len(),
            "fetched samples"
        );

        let label = source.dataset_label(variable);
        data_sources.insert(variable.display_name().to_string(), label.clone());

        let threshold = request.threshold_for(variable);
        match assemble_variable_analysis(variable, threshold, label, samples, request.years) {
            Ok(analysis) => outcomes.push(VariableOutcome::ok(analysis)),
            Err(AnalysisError::NoData { variable }) => {
                tracing::warn!(variable = %variable, "no data available");
                outcomes.push(VariableOutcome::no_data(
                    variable,
                    "No data available for the specified location and date range.",
                ));
            }
            Err(other) => return Err(other),
        }
    }

    Ok(AnalysisResponse {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        location: LocationInfo {
            name: request.location_name.clone(),
            latitude: request.location.latitude,
            longitude: request.location.longitude,
        },
        date: request.target.to_string(),
        years_analyzed: request.years,
        window_days: request.window_days,
        variables: outcomes,
        data_sources,
    })
}

/// Compute the complete analysis for one variable from its samples.
///
/// Trend insufficiency (fewer than two samples, zero variance) never fails
/// the variable; only an empty sample set does.
pub fn assemble_variable_analysis(
    variable: WeatherVariable,
    threshold: f64,
    data_source: String,
    samples: Vec<Sample>,
    years: u32,
) -> Result<VariableAnalysis, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::NoData { variable });
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();

    let no_data = |_| AnalysisError::NoData { variable };
    let statistics = statistics::summarize(&values).map_err(no_data)?;
    let percentiles = statistics::percentile_set(&values).map_err(no_data)?;
    let exceedance = statistics::exceedance(&values, threshold).map_err(no_data)?;

    // Regress on the year offset from the first sampled year; pooled window
    // samples share an x value, which OLS handles fine.
    let first_year = samples.iter().map(|s| s.year).min().unwrap_or(0);
    let points: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| ((s.year - first_year) as f64, s.value))
        .collect();
    let fit = statistics::linear_trend(&points);

    let slope_per_decade = fit.slope_per_year * 10.0;
    let trend = TrendSummary {
        slope_per_year: fit.slope_per_year,
        slope_per_decade,
        intercept: fit.intercept,
        r_squared: fit.r_squared,
        direction: interpretation::trend_direction(slope_per_decade, variable),
        confidence: fit.confidence,
    };

    let probability = ProbabilitySummary {
        threshold,
        exceedance_probability: exceedance.probability,
        exceed_count: exceedance.exceed_count,
        total_count: exceedance.total_count,
        risk_level: interpretation::risk_level(exceedance.probability),
    };

    let interpretation = interpretation::interpretation_text(
        variable,
        years,
        threshold,
        probability.exceedance_probability,
        statistics.mean,
        &trend,
    );

    Ok(VariableAnalysis {
        variable,
        units: variable.units().to_string(),
        data_source,
        statistics,
        percentiles,
        probability,
        trend,
        interpretation,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{OutcomeStatus, TrendConfidence, TrendDirection};
    use crate::sources::FixedSource;
    use std::collections::HashMap;

    fn ramp_samples() -> Vec<Sample> {
        (0..10)
            .map(|i| Sample::new(2015 + i, 10.0 * (i + 1) as f64))
            .collect()
    }

    #[test]
    fn test_assemble_reference_series() {
        let analysis = assemble_variable_analysis(
            WeatherVariable::Temperature,
            85.0,
            "MERRA-2".to_string(),
            ramp_samples(),
            10,
        )
        .unwrap();

        assert_eq!(analysis.statistics.count, 10);
        assert!((analysis.statistics.mean - 55.0).abs() < 1e-9);
        assert!((analysis.statistics.std_dev - 28.722813232690143).abs() < 1e-9);
        assert!((analysis.probability.exceedance_probability - 20.0).abs() < 1e-9);
        assert_eq!(analysis.probability.exceed_count, 2);
        // The ramp climbs 10 units/year = 100 units/decade.
        assert!((analysis.trend.slope_per_decade - 100.0).abs() < 1e-9);
        assert_eq!(analysis.trend.direction, TrendDirection::Increasing);
        assert_eq!(analysis.trend.confidence, TrendConfidence::Strong);
        assert!(analysis.interpretation.contains("low probability (20.0%)"));
    }

    #[test]
    fn test_assemble_constant_series_flags_insufficient_trend() {
        let samples: Vec<Sample> = (0..15).map(|i| Sample::new(2010 + i, 50.0)).collect();
        let analysis = assemble_variable_analysis(
            WeatherVariable::Humidity,
            80.0,
            "MERRA-2".to_string(),
            samples,
            15,
        )
        .unwrap();

        assert_eq!(analysis.statistics.std_dev, 0.0);
        assert_eq!(analysis.percentiles.p10, 50.0);
        assert_eq!(analysis.percentiles.p90, 50.0);
        assert_eq!(analysis.trend.slope_per_decade, 0.0);
        assert_eq!(analysis.trend.confidence, TrendConfidence::Insufficient);
        assert_eq!(analysis.trend.direction, TrendDirection::Stable);
        assert_eq!(analysis.probability.exceedance_probability, 0.0);
    }

    #[test]
    fn test_assemble_empty_is_no_data() {
        let result = assemble_variable_analysis(
            WeatherVariable::Precipitation,
            2.0,
            "GPM IMERG".to_string(),
            vec![],
            20,
        );
        assert!(matches!(
            result,
            Err(AnalysisError::NoData {
                variable: WeatherVariable::Precipitation
            })
        ));
    }

    #[test]
    fn test_assemble_single_sample_keeps_descriptives() {
        let analysis = assemble_variable_analysis(
            WeatherVariable::WindSpeed,
            25.0,
            "MERRA-2".to_string(),
            vec![Sample::new(2024, 30.0)],
            1,
        )
        .unwrap();
        assert_eq!(analysis.statistics.mean, 30.0);
        assert_eq!(analysis.probability.exceedance_probability, 100.0);
        assert_eq!(analysis.trend.confidence, TrendConfidence::Insufficient);
    }

    fn request(variables: Vec<&str>) -> AnalysisRequest {
        AnalysisRequest {
            latitude: 40.0,
            longitude: -105.0,
            location_name: Some("Boulder, CO".to_string()),
            date: "07-15".to_string(),
            variables: variables.into_iter().map(String::from).collect(),
            thresholds: HashMap::new(),
            years: Some(10),
            window_days: Some(0),
            seed: Some(11),
        }
    }

    #[tokio::test]
    async fn test_no_data_variable_does_not_abort_batch() {
        let source = FixedSource::new().with_samples(WeatherVariable::Temperature, ramp_samples());
        let settings = AnalysisSettings::default();

        let response = analyze_request(
            &settings,
            &source,
            &request(vec!["temperature", "precipitation"]),
        )
        .await
        .unwrap();

        assert_eq!(response.variables.len(), 2);
        let temperature = response.outcome(WeatherVariable::Temperature).unwrap();
        assert_eq!(temperature.status, OutcomeStatus::Ok);
        let precipitation = response.outcome(WeatherVariable::Precipitation).unwrap();
        assert_eq!(precipitation.status, OutcomeStatus::NoData);
        assert!(precipitation.message.is_some());
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_before_fetch() {
        let source = FixedSource::new();
        let settings = AnalysisSettings::default();
        let mut bad = request(vec!["temperature"]);
        bad.latitude = 123.0;

        let result = analyze_request(&settings, &source, &bad).await;
        match result {
            Err(AnalysisError::InvalidRequest(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("Latitude"));
            }
            other => panic!("expected InvalidRequest, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_cache_returns_identical_response_for_seeded_request() {
        let source = FixedSource::new().with_samples(WeatherVariable::Temperature, ramp_samples());
        let settings = AnalysisSettings::default();
        let cache = ResultCache::new(&crate::config::CacheSettings::default());
        let req = request(vec!["temperature"]);

        let first = analyze_with_cache(&settings, &source, &cache, &req)
            .await
            .unwrap();
        let second = analyze_with_cache(&settings, &source, &cache, &req)
            .await
            .unwrap();
        assert_eq!(first.analysis_id, second.analysis_id);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_unseeded_request_bypasses_cache() {
        let source = FixedSource::new().with_samples(WeatherVariable::Temperature, ramp_samples());
        let settings = AnalysisSettings::default();
        let cache = ResultCache::new(&crate::config::CacheSettings::default());
        let mut req = request(vec!["temperature"]);
        req.seed = None;

        let first = analyze_with_cache(&settings, &source, &cache, &req)
            .await
            .unwrap();
        let second = analyze_with_cache(&settings, &source, &cache, &req)
            .await
            .unwrap();
        assert_ne!(first.analysis_id, second.analysis_id);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_response_metadata() {
        let source = FixedSource::new().with_samples(WeatherVariable::Temperature, ramp_samples());
        let settings = AnalysisSettings::default();

        let response = analyze_request(&settings, &source, &request(vec!["temperature"]))
            .await
            .unwrap();

        assert_eq!(response.location.name, "Boulder, CO");
        assert_eq!(response.date, "07-15");
        assert_eq!(response.years_analyzed, 10);
        assert_eq!(
            response.data_sources.get("Temperature").map(String::as_str),
            Some("MERRA-2")
        );
    }
}
