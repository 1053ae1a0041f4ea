//! Property-style tests for the pure statistics calculator.

use wpa_rust::api::TrendConfidence;
use wpa_rust::services::statistics::{
    exceedance, linear_trend, percentile, percentile_set, summarize, StatisticsError,
};

fn test_series() -> Vec<Vec<f64>> {
    vec![
        vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0],
        vec![42.0],
        vec![-5.0, -1.0, 0.0, 3.5, 3.5, 12.0],
        vec![1.0, 1.0, 1.0, 2.0],
        vec![0.1, 0.01, 0.001, 1000.0, -1000.0],
    ]
}

#[test]
fn test_percentiles_non_decreasing_for_all_series() {
    for values in test_series() {
        let p = percentile_set(&values).unwrap();
        assert!(p.p10 <= p.p25, "p10 > p25 for {:?}", values);
        assert!(p.p25 <= p.p50, "p25 > p50 for {:?}", values);
        assert!(p.p50 <= p.p75, "p50 > p75 for {:?}", values);
        assert!(p.p75 <= p.p90, "p75 > p90 for {:?}", values);
    }
}

#[test]
fn test_percentiles_bounded_by_min_max() {
    for values in test_series() {
        let stats = summarize(&values).unwrap();
        let p = percentile_set(&values).unwrap();
        assert!(p.p10 >= stats.min);
        assert!(p.p90 <= stats.max);
    }
}

#[test]
fn test_exceedance_monotone_in_threshold() {
    for values in test_series() {
        let mut thresholds: Vec<f64> = values.clone();
        thresholds.push(values.iter().cloned().fold(f64::INFINITY, f64::min) - 1.0);
        thresholds.push(values.iter().cloned().fold(f64::NEG_INFINITY, f64::max) + 1.0);
        thresholds.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let probabilities: Vec<f64> = thresholds
            .iter()
            .map(|t| exceedance(&values, *t).unwrap().probability)
            .collect();
        assert!(
            probabilities.windows(2).all(|w| w[0] >= w[1]),
            "exceedance not monotone for {:?}",
            values
        );
        assert!(probabilities
            .iter()
            .all(|p| (0.0..=100.0).contains(p)));
    }
}

#[test]
fn test_std_dev_nonnegative_and_zero_iff_constant() {
    for values in test_series() {
        let stats = summarize(&values).unwrap();
        assert!(stats.std_dev >= 0.0);
        let all_equal = values.windows(2).all(|w| w[0] == w[1]);
        assert_eq!(stats.std_dev == 0.0, all_equal || values.len() == 1);
    }
}

#[test]
fn test_trend_recovers_exact_slope_on_linear_series() {
    for (a, b) in [(0.0, 1.0), (100.0, -3.25), (-7.5, 0.5), (3.0, 0.0)] {
        let points: Vec<(f64, f64)> = (0..25).map(|x| (x as f64, a + b * x as f64)).collect();
        let fit = linear_trend(&points);
        assert!(
            (fit.slope_per_year - b).abs() < 1e-9,
            "slope {} not recovered (got {})",
            b,
            fit.slope_per_year
        );
        if b != 0.0 {
            assert!((fit.r_squared - 1.0).abs() < 1e-9);
            assert_eq!(fit.confidence, TrendConfidence::Strong);
        }
    }
}

#[test]
fn test_reference_scenario() {
    // 10 samples 10..100, threshold 85: two samples (90, 100) strictly exceed.
    let values: Vec<f64> = (1..=10).map(|i| 10.0 * i as f64).collect();

    let stats = summarize(&values).unwrap();
    assert!((stats.mean - 55.0).abs() < 1e-12);
    assert!((stats.std_dev - 28.722813232690143).abs() < 1e-9);

    let exc = exceedance(&values, 85.0).unwrap();
    assert_eq!(exc.exceed_count, 2);
    assert!((exc.probability - 20.0).abs() < 1e-12);
}

#[test]
fn test_constant_series_scenario() {
    let values = vec![50.0; 15];

    let stats = summarize(&values).unwrap();
    assert_eq!(stats.std_dev, 0.0);

    let p = percentile_set(&values).unwrap();
    assert_eq!((p.p10, p.p50, p.p90), (50.0, 50.0, 50.0));

    let points: Vec<(f64, f64)> = values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect();
    let fit = linear_trend(&points);
    assert_eq!(fit.slope_per_year, 0.0);
    assert_eq!(fit.confidence, TrendConfidence::Insufficient);
}

#[test]
fn test_empty_series_rejected() {
    assert_eq!(summarize(&[]), Err(StatisticsError::EmptySeries));
    assert_eq!(percentile(&[], 50.0), Err(StatisticsError::EmptySeries));
    assert_eq!(
        exceedance(&[], 0.0).map(|e| e.probability),
        Err(StatisticsError::EmptySeries)
    );
}

#[test]
fn test_median_equals_p50() {
    for values in test_series() {
        let stats = summarize(&values).unwrap();
        let p50 = percentile(&values, 50.0).unwrap();
        assert!((stats.median - p50).abs() < 1e-12);
    }
}
