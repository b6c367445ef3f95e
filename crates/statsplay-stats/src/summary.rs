//! Summary statistics for samples
//!
//! Provides the numbers the demos print next to their bodies:
//! - Mean, population variance, standard deviation
//! - Min, max and the five-number summary of a box plot

use serde::{Deserialize, Serialize};

use crate::error::{validation, StatsError, StatsResult};
use crate::outliers::FenceBounds;
use crate::quantile::{sorted_copy, Quartiles};
use crate::sample::SampleEntry;

/// Arithmetic mean of a non-empty finite sample
pub fn mean(data: &[f64]) -> StatsResult<f64> {
    validation::finite_sample("sample", data)?;
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Five number summary statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Compute the summary of an unsorted sample
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        let sorted = sorted_copy(data)?;
        let quartiles = Quartiles::from_sorted(&sorted)?;
        Ok(Self {
            min: sorted[0],
            q1: quartiles.q1,
            median: quartiles.median,
            q3: quartiles.q3,
            max: sorted[sorted.len() - 1],
        })
    }

    /// Build from user-supplied numbers, checking that they are ordered
    pub fn new(min: f64, q1: f64, median: f64, q3: f64, max: f64) -> StatsResult<Self> {
        let values = [min, q1, median, q3, max];
        validation::finite_sample("five-number summary", &values)?;
        if values.windows(2).any(|w| w[0] > w[1]) {
            return Err(StatsError::InvalidParameter {
                name: "five-number summary",
                reason: "values must satisfy min <= q1 <= median <= q3 <= max".to_string(),
            });
        }
        Ok(Self {
            min,
            q1,
            median,
            q3,
            max,
        })
    }

    /// Get the interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Get the range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Tukey fences around the box
    pub fn fences(&self) -> FenceBounds {
        FenceBounds::from_quartiles(&Quartiles {
            q1: self.q1,
            median: self.median,
            q3: self.q3,
        })
    }

    /// The five values in ascending order
    pub fn to_array(&self) -> [f64; 5] {
        [self.min, self.q1, self.median, self.q3, self.max]
    }
}

/// Summary statistics for a sample with possibly missing entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of numeric values
    pub count: usize,
    /// Number of missing entries
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    pub std_dev: f64,
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from numeric data
    pub fn from_data(data: &[f64]) -> StatsResult<Self> {
        Self::compute(data, 0)
    }

    /// Compute summary statistics, skipping missing entries
    pub fn from_entries(entries: &[SampleEntry]) -> StatsResult<Self> {
        let values: Vec<f64> = entries.iter().filter_map(|e| e.value()).collect();
        let missing = entries.len() - values.len();
        Self::compute(&values, missing)
    }

    fn compute(values: &[f64], missing: usize) -> StatsResult<Self> {
        let sorted = sorted_copy(values)?;
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
        let median = Quartiles::from_sorted(&sorted)?.median;

        Ok(Self {
            count,
            missing,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            variance,
            std_dev: variance.sqrt(),
            median,
        })
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Distance from the mean in standard deviations
    ///
    /// NaN for a constant sample.
    pub fn zscore(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }
}
