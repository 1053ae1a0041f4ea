//! Export of analysis results to CSV and JSON.
//!
//! The summary CSV and the JSON document mirror the report layout the
//! frontend offers for download; the time-series CSV carries the raw
//! (year, value) rows with a trailer of summary statistics. JSON keeps
//! full float precision so a parse of the document reproduces every
//! numeric field exactly.

use std::collections::BTreeMap;

use crate::api::{
    AnalysisResponse, ExportAnalysisInfo, ExportCoordinates, ExportDocument, ExportSummary,
    ExportThresholdAnalysis, ExportTrendDetail, ExportTrendValue, ExportVariableStats,
};

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the per-variable summary CSV with `#`-prefixed report metadata.
pub fn summary_csv(response: &AnalysisResponse) -> Result<String, ExportError> {
    let mut out = metadata_header(response);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "Location",
        "Latitude",
        "Longitude",
        "Date",
        "Variable",
        "Mean",
        "Median",
        "StdDev",
        "Min",
        "Max",
        "Threshold",
        "Probability_Exceeding",
        "Trend",
        "Data_Source",
        "Units",
        "Percentile_10th",
        "Percentile_25th",
        "Percentile_50th",
        "Percentile_75th",
        "Percentile_90th",
    ])?;

    for outcome in &response.variables {
        let Some(analysis) = &outcome.analysis else {
            continue;
        };
        wtr.write_record([
            response.location.name.clone(),
            response.location.latitude.to_string(),
            response.location.longitude.to_string(),
            response.date.clone(),
            analysis.variable.display_name().to_string(),
            analysis.statistics.mean.to_string(),
            analysis.statistics.median.to_string(),
            analysis.statistics.std_dev.to_string(),
            analysis.statistics.min.to_string(),
            analysis.statistics.max.to_string(),
            analysis.probability.threshold.to_string(),
            format!("{:.2}%", analysis.probability.exceedance_probability),
            format!("{:.2}", analysis.trend.slope_per_decade),
            analysis.data_source.clone(),
            analysis.units.clone(),
            analysis.percentiles.p10.to_string(),
            analysis.percentiles.p25.to_string(),
            analysis.percentiles.p50.to_string(),
            analysis.percentiles.p75.to_string(),
            analysis.percentiles.p90.to_string(),
        ])?;
    }

    out.push_str(&finish_csv(wtr)?);
    Ok(out)
}

/// Render the raw time-series CSV, one row per sample, with a trailer of
/// summary statistics per variable.
pub fn time_series_csv(response: &AnalysisResponse) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "Location",
        "Latitude",
        "Longitude",
        "Variable",
        "Year",
        "Value",
        "Units",
        "Data_Source",
    ])?;

    for outcome in &response.variables {
        let Some(analysis) = &outcome.analysis else {
            continue;
        };
        for sample in &analysis.samples {
            wtr.write_record([
                response.location.name.clone(),
                response.location.latitude.to_string(),
                response.location.longitude.to_string(),
                analysis.variable.display_name().to_string(),
                sample.year.to_string(),
                sample.value.to_string(),
                analysis.units.clone(),
                analysis.data_source.clone(),
            ])?;
        }
    }

    let mut out = finish_csv(wtr)?;

    out.push_str("#\n# Summary statistics\n");
    for outcome in &response.variables {
        let Some(analysis) = &outcome.analysis else {
            continue;
        };
        out.push_str(&format!(
            "# {}: count={} mean={:.4} std_dev={:.4} p50={:.4} exceedance={:.2}% trend_per_decade={:.4}\n",
            analysis.variable.display_name(),
            analysis.statistics.count,
            analysis.statistics.mean,
            analysis.statistics.std_dev,
            analysis.percentiles.p50,
            analysis.probability.exceedance_probability,
            analysis.trend.slope_per_decade,
        ));
    }

    Ok(out)
}

/// Build the structured JSON export document.
pub fn export_document(response: &AnalysisResponse) -> ExportDocument {
    let mut statistics = BTreeMap::new();
    let mut trends = BTreeMap::new();

    for outcome in &response.variables {
        let Some(analysis) = &outcome.analysis else {
            continue;
        };
        let name = analysis.variable.display_name().to_string();

        statistics.insert(
            name.clone(),
            ExportVariableStats {
                summary: ExportSummary {
                    mean: analysis.statistics.mean,
                    median: analysis.statistics.median,
                    std_dev: analysis.statistics.std_dev,
                    min: analysis.statistics.min,
                    max: analysis.statistics.max,
                },
                percentiles: analysis.percentiles,
                threshold_analysis: ExportThresholdAnalysis {
                    threshold: analysis.probability.threshold,
                    probability_exceeding: analysis.probability.exceedance_probability,
                    units: analysis.units.clone(),
                },
                trend: ExportTrendValue {
                    value: analysis.trend.slope_per_decade,
                    units_per_decade: analysis.units.clone(),
                },
                data_source: analysis.data_source.clone(),
            },
        );

        trends.insert(
            name,
            ExportTrendDetail {
                direction: analysis.trend.direction,
                slope: analysis.trend.slope_per_year,
                r_squared: analysis.trend.r_squared,
                confidence: analysis.trend.confidence,
            },
        );
    }

    ExportDocument {
        analysis_info: ExportAnalysisInfo {
            location: response.location.name.clone(),
            coordinates: ExportCoordinates {
                latitude: response.location.latitude,
                longitude: response.location.longitude,
            },
            date: response.date.clone(),
            years_analyzed: response.years_analyzed,
            generated_at: response.generated_at,
            analysis_id: response.analysis_id,
        },
        statistics,
        trends,
        data_sources: response.data_sources.clone(),
    }
}

/// Serialize the export document as pretty-printed JSON.
pub fn export_json(response: &AnalysisResponse) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&export_document(response))?)
}

fn metadata_header(response: &AnalysisResponse) -> String {
    let sources: Vec<&str> = {
        let mut seen: Vec<&str> = Vec::new();
        for label in response.data_sources.values() {
            if !seen.contains(&label.as_str()) {
                seen.push(label);
            }
        }
        seen
    };

    format!(
        "# Weather Probability Analysis Report\n# Generated: {}\n# Location: {}\n# Years Analyzed: {}\n# Data Sources: {}\n#\n",
        response.generated_at.to_rfc3339(),
        response.location.name,
        response.years_analyzed,
        sources.join(", "),
    )
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LocationInfo, VariableOutcome};
    use crate::models::{Sample, WeatherVariable};
    use crate::services::analysis::assemble_variable_analysis;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_response() -> AnalysisResponse {
        let samples: Vec<Sample> = (0..10)
            .map(|i| Sample::new(2015 + i, 10.0 * (i + 1) as f64))
            .collect();
        let analysis = assemble_variable_analysis(
            WeatherVariable::Temperature,
            85.0,
            "MERRA-2".to_string(),
            samples,
            10,
        )
        .unwrap();

        let mut data_sources = BTreeMap::new();
        data_sources.insert("Temperature".to_string(), "MERRA-2".to_string());

        AnalysisResponse {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            location: LocationInfo {
                name: "Boulder, CO".to_string(),
                latitude: 40.015,
                longitude: -105.2705,
            },
            date: "07-15".to_string(),
            years_analyzed: 10,
            window_days: 0,
            variables: vec![
                VariableOutcome::ok(analysis),
                VariableOutcome::no_data(WeatherVariable::Precipitation, "no samples"),
            ],
            data_sources,
        }
    }

    #[test]
    fn test_summary_csv_layout() {
        let csv = summary_csv(&make_response()).unwrap();
        assert!(csv.starts_with("# Weather Probability Analysis Report\n"));
        assert!(csv.contains("# Years Analyzed: 10\n"));
        assert!(csv.contains("Location,Latitude,Longitude,Date,Variable,Mean"));
        assert!(csv.contains("Temperature"));
        assert!(csv.contains("20.00%"));
        // No row for the no-data variable.
        assert!(!csv.contains("Precipitation,"));
    }

    #[test]
    fn test_time_series_csv_rows_and_trailer() {
        let csv = time_series_csv(&make_response()).unwrap();
        let data_rows = csv.lines().filter(|l| l.contains(",Temperature,")).count();
        assert_eq!(data_rows, 10);
        assert!(csv.contains("# Summary statistics"));
        assert!(csv.contains("# Temperature: count=10 mean=55.0000"));
        assert!(csv.contains("exceedance=20.00%"));
    }

    #[test]
    fn test_export_document_skips_no_data_variables() {
        let doc = export_document(&make_response());
        assert!(doc.statistics.contains_key("Temperature"));
        assert!(!doc.statistics.contains_key("Precipitation"));
        assert_eq!(doc.analysis_info.years_analyzed, 10);
    }

    #[test]
    fn test_json_round_trip_preserves_numeric_fields() {
        let response = make_response();
        let json = export_json(&response).unwrap();
        let parsed: ExportDocument = serde_json::from_str(&json).unwrap();

        let original = export_document(&response);
        let stats = &parsed.statistics["Temperature"];
        let expected = &original.statistics["Temperature"];
        assert_eq!(stats.summary.mean, expected.summary.mean);
        assert_eq!(stats.summary.std_dev, expected.summary.std_dev);
        assert_eq!(stats.percentiles, expected.percentiles);
        assert_eq!(
            stats.threshold_analysis.probability_exceeding,
            expected.threshold_analysis.probability_exceeding
        );
        assert_eq!(
            parsed.trends["Temperature"].r_squared,
            original.trends["Temperature"].r_squared
        );
    }
}
