//! Property tests for the statistics engine
//!
//! Checks the invariants that every caller relies on: quantile endpoints,
//! quartile ordering, fence consistency, the Gaussian peak and exact
//! recovery of noiseless lines.

use proptest::prelude::*;
use statsplay_stats::{
    bins, classify, classify_entries, density, fit, quantile, skew_density, sorted_copy,
    DistributionParams, EntryClass, SampleEntry, StatsError,
};

fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3..1.0e3f64, 1..200)
}

// === Worked examples ===

#[test]
fn test_box_plot_example() {
    let s = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(quantile(&s, 0.25).unwrap(), 2.0);
    assert_eq!(quantile(&s, 0.5).unwrap(), 3.0);
    assert_eq!(quantile(&s, 0.75).unwrap(), 4.0);

    let report = classify(&s).unwrap();
    assert_eq!(report.iqr, 2.0);
    assert_eq!(report.lower_bound(), -1.0);
    assert_eq!(report.upper_bound(), 7.0);
    assert!(report.outliers.is_empty());
}

#[test]
fn test_regression_example() {
    let result = fit(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0, 4.0, 6.0, 8.0, 10.0]).unwrap();
    assert!((result.slope - 2.0).abs() < 1e-12);
    assert!(result.intercept.abs() < 1e-12);
    assert!((result.r_squared - 1.0).abs() < 1e-12);
}

#[test]
fn test_generated_outlier_sample_shape() {
    // 95 values around 10 plus 5 far values, as the funnel demo generates
    let mut data: Vec<f64> = (0..95).map(|i| 8.0 + (i % 9) as f64 * 0.5).collect();
    data.extend([21.0, 24.5, 26.0, 28.2, 29.9]);
    let report = classify(&data).unwrap();
    assert_eq!(report.outliers, vec![21.0, 24.5, 26.0, 28.2, 29.9]);
}

#[test]
fn test_errors_surface_immediately() {
    assert_eq!(quantile(&[], 0.5), Err(StatsError::EmptySample));
    assert!(fit(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err().is_invalid_input());
}

// === Properties ===

proptest! {
    #[test]
    fn prop_quantile_endpoints(data in sample_strategy()) {
        let sorted = sorted_copy(&data).unwrap();
        prop_assert_eq!(quantile(&sorted, 0.0).unwrap(), sorted[0]);
        prop_assert_eq!(quantile(&sorted, 1.0).unwrap(), sorted[sorted.len() - 1]);
    }

    #[test]
    fn prop_median_is_textbook(data in sample_strategy()) {
        let sorted = sorted_copy(&data).unwrap();
        let n = sorted.len();
        let expected = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let median = quantile(&sorted, 0.5).unwrap();
        prop_assert!((median - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
    }

    #[test]
    fn prop_quantile_monotone(data in sample_strategy(), a in 0.0..=1.0f64, b in 0.0..=1.0f64) {
        let sorted = sorted_copy(&data).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // one ulp of slack where the interpolation crosses an order statistic
        prop_assert!(quantile(&sorted, lo).unwrap() <= quantile(&sorted, hi).unwrap() + 1e-9);
    }

    #[test]
    fn prop_quartiles_and_fences_ordered(data in sample_strategy()) {
        let report = classify(&data).unwrap();
        prop_assert!(report.q1 <= report.median);
        prop_assert!(report.median <= report.q3);
        prop_assert!(report.lower_bound() <= report.q1);
        prop_assert!(report.upper_bound() >= report.q3);
    }

    #[test]
    fn prop_partition_respects_fences(data in sample_strategy()) {
        let report = classify(&data).unwrap();
        prop_assert_eq!(report.len(), data.len());
        for v in &report.inliers {
            prop_assert!(report.lower_bound() <= *v && *v <= report.upper_bound());
        }
        for v in &report.outliers {
            prop_assert!(*v < report.lower_bound() || *v > report.upper_bound());
        }
    }

    #[test]
    fn prop_entry_classes_cover_input(
        values in prop::collection::vec(prop::option::of(-50.0..50.0f64), 1..100)
    ) {
        let entries: Vec<SampleEntry> = values.iter().copied().map(SampleEntry::from).collect();
        match classify_entries(&entries) {
            Ok(report) => {
                prop_assert_eq!(report.classes.len(), entries.len());
                for (entry, class) in entries.iter().zip(&report.classes) {
                    prop_assert_eq!(entry.is_missing(), *class == EntryClass::Missing);
                }
            }
            Err(err) => {
                prop_assert_eq!(err, StatsError::EmptySample);
                prop_assert!(entries.iter().all(|e| e.is_missing()));
            }
        }
    }

    #[test]
    fn prop_gaussian_peak_at_mean(
        mean in -100.0..100.0f64,
        sd in 0.01..50.0f64,
        x in -500.0..500.0f64
    ) {
        prop_assert!(density(x, mean, sd) <= density(mean, mean, sd));
    }

    #[test]
    fn prop_neutral_skew_is_gaussian(
        mean in -10.0..10.0f64,
        sd in 0.1..10.0f64,
        x in -50.0..50.0f64
    ) {
        let g = density(x, mean, sd);
        let s = skew_density(x, mean, sd, 0.0, 3.0);
        prop_assert!((g - s).abs() <= 1e-8 * (1.0 + g));
    }

    #[test]
    fn prop_bin_weights_in_unit_interval(
        mean in -100.0..100.0f64,
        sd in 0.01..50.0f64,
        skew in -10.0..10.0f64,
        kurtosis in 0.0..12.0f64,
        num_bins in 1usize..40
    ) {
        let params = DistributionParams::gaussian(mean, sd)
            .with_skew(skew)
            .with_kurtosis(kurtosis);
        for bin in bins(&params, num_bins).unwrap() {
            prop_assert!(
                (0.0..=1.0).contains(&bin.probability),
                "weight {} at sigma {}", bin.probability, bin.sigma
            );
        }
    }

    #[test]
    fn prop_fit_recovers_exact_line(
        a in -10.0..10.0f64,
        b in -10.0..10.0f64,
        xs in prop::collection::btree_set(-1000i32..1000, 2..50)
    ) {
        let x: Vec<f64> = xs.into_iter().map(|v| v as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|xi| a * xi + b).collect();
        let result = fit(&x, &y).unwrap();
        prop_assert!((result.slope - a).abs() < 1e-8);
        prop_assert!((result.intercept - b).abs() < 1e-6);
        if a.abs() > 0.1 {
            prop_assert!((result.r_squared - 1.0).abs() < 1e-9);
        }
    }
}
