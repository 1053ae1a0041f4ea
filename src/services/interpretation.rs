//! Natural-language interpretation of analysis results.
//!
//! Risk bands: below 30% is low, 30-60% moderate, above 60% high.
//! A trend counts as "stable" when the per-decade change is below 1% of the
//! variable's typical magnitude.

use crate::api::{RiskLevel, TrendDirection, TrendSummary};
use crate::models::WeatherVariable;

/// Fraction of a variable's typical magnitude below which the per-decade
/// trend is labeled stable.
const TREND_STABLE_FRACTION: f64 = 0.01;

/// Risk band for an exceedance probability (0-100).
pub fn risk_level(probability: f64) -> RiskLevel {
    if probability < 30.0 {
        RiskLevel::Low
    } else if probability < 60.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// Direction label for a per-decade trend, scaled to the variable.
pub fn trend_direction(slope_per_decade: f64, variable: WeatherVariable) -> TrendDirection {
    let tolerance = variable.typical_magnitude() * TREND_STABLE_FRACTION;
    if slope_per_decade.abs() < tolerance {
        TrendDirection::Stable
    } else if slope_per_decade > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    }
}

/// Templated plain-text summary of one variable's analysis.
pub fn interpretation_text(
    variable: WeatherVariable,
    years: u32,
    threshold: f64,
    probability: f64,
    mean: f64,
    trend: &TrendSummary,
) -> String {
    let units = variable.units();

    let likelihood = match risk_level(probability) {
        RiskLevel::High => "high likelihood",
        RiskLevel::Moderate => "moderate chance",
        RiskLevel::Low => "low probability",
    };

    let mut text = format!(
        "Based on {} years of historical data, there is a {} ({:.1}%) that {} exceeds {} {} on this date. ",
        years, likelihood, probability, variable, threshold, units
    );

    text.push_str(&format!("The historical average is {:.2} {}. ", mean, units));

    match trend.direction {
        TrendDirection::Stable => {
            text.push_str("The long-term trend is relatively stable.");
        }
        TrendDirection::Increasing => {
            text.push_str(&format!(
                "There is a notable increasing trend of {:.2} {} per decade.",
                trend.slope_per_decade.abs(),
                units
            ));
        }
        TrendDirection::Decreasing => {
            text.push_str(&format!(
                "There is a notable decreasing trend of {:.2} {} per decade.",
                trend.slope_per_decade.abs(),
                units
            ));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TrendConfidence;

    fn trend(slope_per_decade: f64, direction: TrendDirection) -> TrendSummary {
        TrendSummary {
            slope_per_year: slope_per_decade / 10.0,
            slope_per_decade,
            intercept: 0.0,
            r_squared: 0.9,
            direction,
            confidence: TrendConfidence::Strong,
        }
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(risk_level(0.0), RiskLevel::Low);
        assert_eq!(risk_level(29.9), RiskLevel::Low);
        assert_eq!(risk_level(30.0), RiskLevel::Moderate);
        assert_eq!(risk_level(59.9), RiskLevel::Moderate);
        assert_eq!(risk_level(60.0), RiskLevel::High);
        assert_eq!(risk_level(100.0), RiskLevel::High);
    }

    #[test]
    fn test_trend_direction_scaled_to_variable() {
        // 0.5 °F/decade is below 1% of the 60 °F typical magnitude: stable.
        assert_eq!(
            trend_direction(0.5, WeatherVariable::Temperature),
            TrendDirection::Stable
        );
        assert_eq!(
            trend_direction(0.7, WeatherVariable::Temperature),
            TrendDirection::Increasing
        );
        // The same 0.5 in/decade is enormous for precipitation.
        assert_eq!(
            trend_direction(0.5, WeatherVariable::Precipitation),
            TrendDirection::Increasing
        );
        assert_eq!(
            trend_direction(-0.5, WeatherVariable::Precipitation),
            TrendDirection::Decreasing
        );
    }

    #[test]
    fn test_interpretation_mentions_probability_and_mean() {
        let text = interpretation_text(
            WeatherVariable::Temperature,
            20,
            90.0,
            45.0,
            85.21,
            &trend(1.25, TrendDirection::Increasing),
        );
        assert!(text.contains("20 years"));
        assert!(text.contains("moderate chance (45.0%)"));
        assert!(text.contains("exceeds 90 °F"));
        assert!(text.contains("historical average is 85.21 °F"));
        assert!(text.contains("increasing trend of 1.25 °F per decade"));
    }

    #[test]
    fn test_interpretation_stable_trend() {
        let text = interpretation_text(
            WeatherVariable::Humidity,
            15,
            80.0,
            10.0,
            64.0,
            &trend(0.1, TrendDirection::Stable),
        );
        assert!(text.contains("low probability (10.0%)"));
        assert!(text.contains("relatively stable"));
    }
}
