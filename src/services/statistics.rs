//! Pure statistics over numeric sample sequences.
//!
//! Every function here is a pure function of its inputs; the analysis
//! service feeds them the (year, value) samples fetched from a source.
//! Numeric conventions match the historical reference outputs: population
//! standard deviation (denominator `n`), linear-interpolation percentiles,
//! strict `>` exceedance comparison.

use crate::api::{DescriptiveStats, PercentileSet, TrendConfidence};

/// Error type for statistics over sample sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatisticsError {
    #[error("Cannot compute statistics over an empty sample sequence")]
    EmptySeries,
}

/// Threshold exceedance counts and probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExceedanceStats {
    pub exceed_count: usize,
    pub total_count: usize,
    /// Percentage of samples strictly above the threshold (0-100)
    pub probability: f64,
}

/// Ordinary least-squares fit of value against sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    /// Slope in value units per index step (one step = one year)
    pub slope_per_year: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub confidence: TrendConfidence,
}

/// Compute count, mean, median, population standard deviation, min, and max.
pub fn summarize(values: &[f64]) -> Result<DescriptiveStats, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptySeries);
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = percentile_of_sorted(&sorted, 50.0);

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;
    let std_dev = variance.sqrt();

    let min = sorted[0];
    let max = sorted[count - 1];

    Ok(DescriptiveStats {
        count,
        mean,
        median,
        std_dev,
        min,
        max,
    })
}

/// Percentile at level `p` (0-100) using linear rank interpolation.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptySeries);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(percentile_of_sorted(&sorted, p))
}

/// Percentiles at the standard report levels (10/25/50/75/90).
pub fn percentile_set(values: &[f64]) -> Result<PercentileSet, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptySeries);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Ok(PercentileSet {
        p10: percentile_of_sorted(&sorted, 10.0),
        p25: percentile_of_sorted(&sorted, 25.0),
        p50: percentile_of_sorted(&sorted, 50.0),
        p75: percentile_of_sorted(&sorted, 75.0),
        p90: percentile_of_sorted(&sorted, 90.0),
    })
}

/// Linear rank interpolation over an already-sorted slice.
fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = rank - lower as f64;
        sorted[lower] + weight * (sorted[upper] - sorted[lower])
    }
}

/// Fraction of samples strictly above the threshold, as a percentage.
pub fn exceedance(values: &[f64], threshold: f64) -> Result<ExceedanceStats, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptySeries);
    }
    let exceed_count = values.iter().filter(|v| **v > threshold).count();
    let total_count = values.len();
    Ok(ExceedanceStats {
        exceed_count,
        total_count,
        probability: 100.0 * exceed_count as f64 / total_count as f64,
    })
}

/// OLS linear regression of value on index.
///
/// Degenerate inputs never error: fewer than two points, or a series with
/// zero variance, yield a zero slope flagged [`TrendConfidence::Insufficient`].
pub fn linear_trend(points: &[(f64, f64)]) -> TrendFit {
    let n = points.len();

    if n < 2 {
        let intercept = points.first().map(|(_, y)| *y).unwrap_or(0.0);
        return TrendFit {
            slope_per_year: 0.0,
            intercept,
            r_squared: 0.0,
            confidence: TrendConfidence::Insufficient,
        };
    }

    let n_f = n as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let denominator = n_f * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        // All x identical: no spread to regress over.
        return TrendFit {
            slope_per_year: 0.0,
            intercept: sum_y / n_f,
            r_squared: 0.0,
            confidence: TrendConfidence::Insufficient,
        };
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n_f;

    let mean_y = sum_y / n_f;
    let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y) * (y - mean_y)).sum();
    let ss_res: f64 = points
        .iter()
        .map(|(x, y)| {
            let fitted = slope * x + intercept;
            (y - fitted) * (y - fitted)
        })
        .sum();

    if ss_tot == 0.0 {
        // Zero variance: the fit is exact but meaningless.
        return TrendFit {
            slope_per_year: slope,
            intercept,
            r_squared: 0.0,
            confidence: TrendConfidence::Insufficient,
        };
    }

    let r_squared = 1.0 - ss_res / ss_tot;
    let confidence = if r_squared.abs() > 0.7 {
        TrendConfidence::Strong
    } else if r_squared.abs() > 0.4 {
        TrendConfidence::Moderate
    } else {
        TrendConfidence::Weak
    };

    TrendFit {
        slope_per_year: slope,
        intercept,
        r_squared,
        confidence,
    }
}
