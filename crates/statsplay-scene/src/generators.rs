//! Seeded sample generators for the demos
//!
//! Normal variates come from the Box–Muller transform over a seeded
//! [`StdRng`], so a given seed always yields the same sample.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use statsplay_stats::SampleEntry;

use crate::config::GeneratorConfig;
use crate::error::{SceneError, SceneResult};

/// Mean of the bulk of an outlier sample
const BULK_MEAN: f64 = 10.0;
/// Standard deviation of the bulk of an outlier sample
const BULK_STD_DEV: f64 = 2.0;
/// Outliers are uniform in `[OUTLIER_LOW, OUTLIER_LOW + OUTLIER_SPAN)`
const OUTLIER_LOW: f64 = 20.0;
const OUTLIER_SPAN: f64 = 10.0;
/// Correlations closer to zero than this produce unrelated pairs
const ZERO_CORRELATION: f64 = 1e-6;
const FALLBACK_CORRELATION: f64 = 0.5;

/// Paired observations for the regression exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairedSample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PairedSample {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    fn shifted(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x: shift_positive(x),
            y: shift_positive(y),
        }
    }
}

/// Shift a sample so every value is positive
///
/// When the minimum is negative every value is moved by `0.1 - min`;
/// otherwise the sample is returned unchanged.
pub fn shift_positive(mut values: Vec<f64>) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if min < 0.0 {
        for v in &mut values {
            *v = *v - min + 0.1;
        }
    }
    values
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Deterministic source of demo samples
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.seed)
    }

    /// Uniform in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Standard normal variate (Box–Muller)
    pub fn standard_normal(&mut self) -> f64 {
        // 1 - [0, 1) keeps u away from zero
        let u = 1.0 - self.rng.gen::<f64>();
        let v = self.rng.gen::<f64>();
        (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
    }

    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.standard_normal()
    }

    /// Sample with a normal bulk, a few high outliers and missing markers
    ///
    /// At least one outlier and one missing entry are always produced. The
    /// bulk is N(10, 2) and outliers are uniform in [20, 30); numeric
    /// values are rounded to two decimals. Entries are ordered bulk first,
    /// then outliers, then missing markers.
    pub fn outlier_sample(
        &mut self,
        total: usize,
        outlier_pct: f64,
        missing_pct: f64,
    ) -> SceneResult<Vec<SampleEntry>> {
        for (name, pct) in [("outlier_pct", outlier_pct), ("missing_pct", missing_pct)] {
            if !(0.0..=1.0).contains(&pct) {
                return Err(SceneError::InvalidParameter {
                    name,
                    reason: format!("must be between 0 and 1, got {}", pct),
                });
            }
        }

        let outliers = ((total as f64 * outlier_pct).round() as usize).max(1);
        let missing = ((total as f64 * missing_pct).round() as usize).max(1);
        let bulk = total.saturating_sub(outliers + missing);
        if bulk == 0 {
            tracing::warn!(
                "Outlier sample of {} entries has no room for a normal bulk",
                total
            );
        }

        let mut entries = Vec::with_capacity(bulk + outliers + missing);
        for _ in 0..bulk {
            entries.push(SampleEntry::Value(round2(self.normal(BULK_MEAN, BULK_STD_DEV))));
        }
        for _ in 0..outliers {
            let v = OUTLIER_LOW + self.uniform() * OUTLIER_SPAN;
            entries.push(SampleEntry::Value(round2(v)));
        }
        entries.extend(std::iter::repeat(SampleEntry::Missing).take(missing));

        tracing::debug!(
            "Generated outlier sample: {} normal, {} outliers, {} missing",
            bulk,
            outliers,
            missing
        );
        Ok(entries)
    }

    /// Outlier sample sized from config
    pub fn outlier_sample_from(
        &mut self,
        config: &GeneratorConfig,
    ) -> SceneResult<Vec<SampleEntry>> {
        self.outlier_sample(config.total, config.outlier_pct, config.missing_pct)
    }

    /// Pairs whose population correlation is `corr`
    ///
    /// `corr` outside (-1, 1) or non-finite falls back to 0.5; a
    /// correlation within 1e-6 of zero produces unrelated pairs.
    pub fn correlated(&mut self, corr: f64, intercept: f64, n: usize) -> PairedSample {
        let corr = if corr.is_finite() && corr > -1.0 && corr < 1.0 {
            corr
        } else {
            tracing::warn!("Correlation {} out of range, using {}", corr, FALLBACK_CORRELATION);
            FALLBACK_CORRELATION
        };
        if corr.abs() < ZERO_CORRELATION {
            return self.random_pairs(n);
        }

        let noise = ((1.0 - corr * corr) / (corr * corr)).sqrt();
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        for _ in 0..n {
            let xi = self.standard_normal();
            x.push(xi);
            y.push(corr * xi + intercept + self.standard_normal() * noise);
        }
        PairedSample::shifted(x, y)
    }

    /// Pairs lying exactly on `y = slope * x + intercept` before shifting
    pub fn perfect(&mut self, slope: f64, intercept: f64, n: usize) -> PairedSample {
        let x: Vec<f64> = (0..n).map(|_| self.standard_normal()).collect();
        let y: Vec<f64> = x.iter().map(|xi| slope * xi + intercept).collect();
        PairedSample::shifted(x, y)
    }

    /// Independent standard normal pairs
    pub fn random_pairs(&mut self, n: usize) -> PairedSample {
        let mut x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        for _ in 0..n {
            x.push(self.standard_normal());
            y.push(self.standard_normal());
        }
        PairedSample::shifted(x, y)
    }
}
