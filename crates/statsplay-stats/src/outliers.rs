//! IQR-fence outlier classification
//!
//! A value is an outlier when it lies strictly outside
//! `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]` (Tukey's fences).
//!
//! Two entry points:
//! - [`classify`] for plain numeric samples
//! - [`classify_entries`] for samples with explicit missing markers, which
//!   are left out of the quartiles but kept as their own category

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::quantile::{sorted_copy, Quartiles};
use crate::sample::SampleEntry;

/// Fence multiplier applied to the IQR
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// Lower and upper outlier fences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FenceBounds {
    pub lower: f64,
    pub upper: f64,
}

impl FenceBounds {
    /// Fences from quartiles with the fixed 1.5 multiplier
    pub fn from_quartiles(quartiles: &Quartiles) -> Self {
        let iqr = quartiles.iqr();
        Self {
            lower: quartiles.q1 - FENCE_MULTIPLIER * iqr,
            upper: quartiles.q3 + FENCE_MULTIPLIER * iqr,
        }
    }

    /// Inclusive containment check
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        !self.contains(value)
    }
}

/// Result of classifying a numeric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct OutlierReport {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub fences: FenceBounds,
    /// Values within the fences, ascending
    pub inliers: Vec<f64>,
    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,
}

impl OutlierReport {
    pub fn lower_bound(&self) -> f64 {
        self.fences.lower
    }

    pub fn upper_bound(&self) -> f64 {
        self.fences.upper
    }

    /// Smallest and largest inlier (the whisker ends of a box plot)
    ///
    /// `None` when every value is an outlier.
    pub fn inlier_range(&self) -> Option<(f64, f64)> {
        match (self.inliers.first(), self.inliers.last()) {
            (Some(&lo), Some(&hi)) => Some((lo, hi)),
            _ => None,
        }
    }

    pub fn quartiles(&self) -> Quartiles {
        Quartiles {
            q1: self.q1,
            median: self.median,
            q3: self.q3,
        }
    }

    /// Total number of classified values
    pub fn len(&self) -> usize {
        self.inliers.len() + self.outliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify a numeric sample into inliers and outliers
///
/// The input does not need to be sorted.
pub fn classify(sample: &[f64]) -> StatsResult<OutlierReport> {
    let sorted = sorted_copy(sample)?;
    let quartiles = Quartiles::from_sorted(&sorted)?;
    let fences = FenceBounds::from_quartiles(&quartiles);

    let (inliers, outliers): (Vec<f64>, Vec<f64>) =
        sorted.into_iter().partition(|&v| fences.contains(v));

    if inliers.is_empty() {
        tracing::debug!(
            "All {} values fall outside the fences [{}, {}]",
            outliers.len(),
            fences.lower,
            fences.upper
        );
    }

    Ok(OutlierReport {
        q1: quartiles.q1,
        median: quartiles.median,
        q3: quartiles.q3,
        iqr: quartiles.iqr(),
        fences,
        inliers,
        outliers,
    })
}

/// Category of one entry of a sample with missing markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum EntryClass {
    Inlier,
    Outlier,
    Missing,
}

/// Result of classifying a sample with missing markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryReport {
    /// Statistics over the numeric entries only
    pub numeric: OutlierReport,
    /// One class per input entry, in input order
    pub classes: Vec<EntryClass>,
    /// Number of missing entries
    pub missing: usize,
}

impl EntryReport {
    /// Indices of entries in the given class
    pub fn indices_of(&self, class: EntryClass) -> Vec<usize> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == class)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn count_of(&self, class: EntryClass) -> usize {
        self.classes.iter().filter(|c| **c == class).count()
    }
}

/// Classify a sample whose entries may be missing
///
/// Missing entries are excluded from the quartiles and fences. Fails with
/// [`StatsError::EmptySample`] when no numeric entry is left.
pub fn classify_entries(entries: &[SampleEntry]) -> StatsResult<EntryReport> {
    let values: Vec<f64> = entries.iter().filter_map(|e| e.value()).collect();
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }

    let numeric = classify(&values)?;
    let classes: Vec<EntryClass> = entries
        .iter()
        .map(|e| match e.value() {
            None => EntryClass::Missing,
            Some(v) if numeric.fences.contains(v) => EntryClass::Inlier,
            Some(_) => EntryClass::Outlier,
        })
        .collect();
    let missing = entries.len() - values.len();

    Ok(EntryReport {
        numeric,
        classes,
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_no_outliers() {
        let report = classify(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(report.q1, 2.0);
        assert_eq!(report.median, 3.0);
        assert_eq!(report.q3, 4.0);
        assert_eq!(report.iqr, 2.0);
        assert_eq!(report.lower_bound(), -1.0);
        assert_eq!(report.upper_bound(), 7.0);
        assert!(report.outliers.is_empty());
        assert_eq!(report.inlier_range(), Some((1.0, 5.0)));
    }

    #[test]
    fn test_classify_with_outliers() {
        let report = classify(&[10.0, 1.0, 2.0, 3.0, 4.0, 5.0, -20.0, 30.0]).unwrap();
        assert_eq!(report.outliers, vec![-20.0, 30.0]);
        assert_eq!(report.len(), 8);
        for v in &report.inliers {
            assert!(report.fences.contains(*v));
        }
    }

    #[test]
    fn test_fence_boundary_is_inlier() {
        let fences = FenceBounds {
            lower: -1.0,
            upper: 7.0,
        };
        assert!(fences.contains(7.0));
        assert!(fences.contains(-1.0));
        assert!(fences.is_outlier(7.0 + 1e-9));
    }

    #[test]
    fn test_constant_sample() {
        let report = classify(&[4.0; 6]).unwrap();
        assert_eq!(report.iqr, 0.0);
        assert_eq!(report.inliers.len(), 6);
        assert_eq!(report.inlier_range(), Some((4.0, 4.0)));
    }

    #[test]
    fn test_empty_inlier_range_is_safe() {
        let report = OutlierReport {
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
            iqr: 0.0,
            fences: FenceBounds {
                lower: 0.0,
                upper: 0.0,
            },
            inliers: vec![],
            outliers: vec![1.0, 2.0],
        };
        assert_eq!(report.inlier_range(), None);
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(&[]), Err(StatsError::EmptySample));
    }

    #[test]
    fn test_classify_entries() {
        let entries = [
            SampleEntry::Value(1.0),
            SampleEntry::Missing,
            SampleEntry::Value(2.0),
            SampleEntry::Value(3.0),
            SampleEntry::Value(4.0),
            SampleEntry::Value(100.0),
            SampleEntry::Missing,
        ];
        let report = classify_entries(&entries).unwrap();

        assert_eq!(report.classes.len(), entries.len());
        assert_eq!(report.missing, 2);
        assert_eq!(report.indices_of(EntryClass::Missing), vec![1, 6]);
        assert_eq!(report.indices_of(EntryClass::Outlier), vec![5]);
        assert_eq!(report.count_of(EntryClass::Inlier), 4);
        assert_eq!(report.numeric.len(), 5);
    }

    #[test]
    fn test_classify_entries_all_missing() {
        let entries = [SampleEntry::Missing, SampleEntry::Missing];
        assert_eq!(classify_entries(&entries), Err(StatsError::EmptySample));
    }
}
