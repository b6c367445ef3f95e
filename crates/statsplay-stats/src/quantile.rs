//! Linear-interpolation quantiles over a sorted sample
//!
//! For a sorted sample of n values and a probability p, the quantile sits at
//! fractional position `(n - 1) * p` and is interpolated linearly between the
//! two neighbouring order statistics. This is the "type 7" estimator used by
//! R, NumPy and spreadsheet software, so `quantile(s, 0.5)` is the textbook
//! median.

use serde::{Deserialize, Serialize};

use crate::error::{validation, StatsError, StatsResult};

/// Quantile of an ascending-sorted sample
///
/// Returns `sorted[base]` when `base + 1` falls off the end, otherwise
/// interpolates towards `sorted[base + 1]`.
///
/// The caller is responsible for the ordering; use [`sorted_copy`] when the
/// data is not sorted yet.
pub fn quantile(sorted: &[f64], p: f64) -> StatsResult<f64> {
    validation::finite_sample("sample", sorted)?;
    let p = validation::probability(p)?;
    Ok(interpolate(sorted, p))
}

/// Quantile of an unsorted sample (sorts a copy)
pub fn quantile_unsorted(data: &[f64], p: f64) -> StatsResult<f64> {
    let sorted = sorted_copy(data)?;
    quantile(&sorted, p)
}

/// Validate and sort a copy of the data in ascending order
pub fn sorted_copy(data: &[f64]) -> StatsResult<Vec<f64>> {
    validation::finite_sample("sample", data)?;
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Interpolation kernel; inputs already validated
fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;

    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}

/// First quartile, median and third quartile of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Quartiles of an ascending-sorted sample
    pub fn from_sorted(sorted: &[f64]) -> StatsResult<Self> {
        validation::finite_sample("sample", sorted)?;
        if sorted.windows(2).any(|w| w[0] > w[1]) {
            return Err(StatsError::InvalidParameter {
                name: "sample",
                reason: "must be sorted ascending".to_string(),
            });
        }

        Ok(Self {
            q1: interpolate(sorted, 0.25),
            median: interpolate(sorted, 0.5),
            q3: interpolate(sorted, 0.75),
        })
    }

    /// Interquartile range (Q3 - Q1)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Quartiles of an ascending-sorted sample
pub fn quartiles(sorted: &[f64]) -> StatsResult<Quartiles> {
    Quartiles::from_sorted(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_fn() {
        let q = quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(q.q1, 1.75);
        assert_eq!(q.median, 2.5);
        assert_eq!(q.q3, 3.25);
        assert_eq!(q.iqr(), 1.5);
    }

    #[test]
    fn test_quantile_basic() {
        let s = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&s, 0.0).unwrap(), 1.0);
        assert_eq!(quantile(&s, 0.25).unwrap(), 2.0);
        assert_eq!(quantile(&s, 0.5).unwrap(), 3.0);
        assert_eq!(quantile(&s, 0.75).unwrap(), 4.0);
        assert_eq!(quantile(&s, 1.0).unwrap(), 5.0);
    }

    #[test]
    fn test_quantile_interpolates() {
        let s = [1.0, 2.0, 3.0, 4.0];
        // pos = 3 * 0.5 = 1.5 -> halfway between 2 and 3
        assert!((quantile(&s, 0.5).unwrap() - 2.5).abs() < 1e-12);
        // pos = 3 * 0.25 = 0.75
        assert!((quantile(&s, 0.25).unwrap() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_quantile_single_element() {
        for p in [0.0, 0.3, 0.5, 1.0] {
            assert_eq!(quantile(&[7.5], p).unwrap(), 7.5);
        }
    }

    #[test]
    fn test_quantile_errors() {
        assert_eq!(quantile(&[], 0.5), Err(StatsError::EmptySample));
        assert_eq!(
            quantile(&[1.0, 2.0], 1.5),
            Err(StatsError::ProbabilityOutOfRange(1.5))
        );
        assert!(quantile(&[1.0, 2.0], -0.1).is_err());
        assert!(quantile(&[1.0, f64::NAN], 0.5).is_err());
    }

    #[test]
    fn test_quantile_unsorted() {
        let data = [5.0, 1.0, 4.0, 2.0, 3.0];
        assert_eq!(quantile_unsorted(&data, 0.5).unwrap(), 3.0);
    }

    #[test]
    fn test_quartiles() {
        let q = Quartiles::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(q.q1, 2.0);
        assert_eq!(q.median, 3.0);
        assert_eq!(q.q3, 4.0);
        assert_eq!(q.iqr(), 2.0);
    }

    #[test]
    fn test_quartiles_rejects_unsorted() {
        assert!(Quartiles::from_sorted(&[3.0, 1.0, 2.0]).is_err());
    }
}
