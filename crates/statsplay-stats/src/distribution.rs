//! Gaussian and skew-normal densities, and sigma binning
//!
//! The bell-curve demos discretise a distribution into equal-width slices
//! of [-5σ, +5σ]. Each slice gets a weight in [0, 1] (its density relative
//! to the peak density) and a severity tag that drives its colour.
//!
//! # Kurtosis
//!
//! The kurtosis parameter scales the skew-normal density by
//! `exp(-0.5 * z^(kurtosis / 3))`. This is not the textbook kurtosis
//! correction. `kurtosis = 3` (the normal value) is neutral and leaves the
//! density untouched. For negative `z` and a fractional exponent the power
//! is undefined and the adjusted density is NaN.

use std::f64::consts::{PI, SQRT_2};

use serde::{Deserialize, Serialize};

use crate::error::{validation, StatsError, StatsResult};
use crate::special::erf;

/// Half-width of the binned range, in standard deviations
pub const SIGMA_RANGE: f64 = 5.0;

/// Kurtosis of the normal distribution (no adjustment)
pub const NORMAL_KURTOSIS: f64 = 3.0;

/// Grid points over [-5σ, +5σ] searched for the peak density
const PEAK_GRID: usize = 1000;

/// Gaussian probability density
pub fn density(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Skew-normal density with the kurtosis adjustment
///
/// `2 * density(x) * Φ(skew * z)`, multiplied by `exp(-0.5 * z^(kurtosis/3))`
/// unless `kurtosis` is the neutral value 3.
///
/// The neutral case is an exact comparison against [`NORMAL_KURTOSIS`]:
/// `kurtosis = 3` skips the factor entirely, while any other value (however
/// close to 3) applies it, so the density is discontinuous at 3.
pub fn skew_density(x: f64, mean: f64, std_dev: f64, skew: f64, kurtosis: f64) -> f64 {
    let z = (x - mean) / std_dev;
    let cdf = 0.5 * (1.0 + erf(skew * z / SQRT_2));
    let base = 2.0 * density(x, mean, std_dev) * cdf;

    if kurtosis == NORMAL_KURTOSIS {
        base
    } else {
        base * (-0.5 * z.powf(kurtosis / 3.0)).exp()
    }
}

/// Parameters of a (skew-)normal distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct DistributionParams {
    pub mean: f64,
    pub std_dev: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self::standard()
    }
}

impl DistributionParams {
    /// N(0, 1)
    pub fn standard() -> Self {
        Self::gaussian(0.0, 1.0)
    }

    /// Plain Gaussian: no skew, neutral kurtosis
    pub fn gaussian(mean: f64, std_dev: f64) -> Self {
        Self {
            mean,
            std_dev,
            skew: 0.0,
            kurtosis: NORMAL_KURTOSIS,
        }
    }

    pub fn with_skew(mut self, skew: f64) -> Self {
        self.skew = skew;
        self
    }

    pub fn with_kurtosis(mut self, kurtosis: f64) -> Self {
        self.kurtosis = kurtosis;
        self
    }

    /// Check that all parameters are finite and the spread is positive
    pub fn validate(&self) -> StatsResult<()> {
        validation::finite("mean", self.mean)?;
        validation::finite("std_dev", self.std_dev)?;
        validation::finite("skew", self.skew)?;
        validation::finite("kurtosis", self.kurtosis)?;
        if self.std_dev <= 0.0 {
            return Err(StatsError::InvalidParameter {
                name: "std_dev",
                reason: format!("must be positive, got {}", self.std_dev),
            });
        }
        Ok(())
    }

    /// Adjusted skew-normal density at `x`
    pub fn density_at(&self, x: f64) -> f64 {
        skew_density(x, self.mean, self.std_dev, self.skew, self.kurtosis)
    }

    /// Value `sigma` standard deviations from the mean
    pub fn value_at_sigma(&self, sigma: f64) -> f64 {
        self.mean + sigma * self.std_dev
    }
}

/// How far a bin sits from the mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Severity {
    /// |σ| <= 1
    Near,
    /// |σ| <= 2
    Moderate,
    /// |σ| <= 3
    Far,
    /// beyond 3σ
    Extreme,
}

impl Severity {
    pub fn from_sigma(sigma: f64) -> Self {
        let abs = sigma.abs();
        if abs <= 1.0 {
            Severity::Near
        } else if abs <= 2.0 {
            Severity::Moderate
        } else if abs <= 3.0 {
            Severity::Far
        } else {
            Severity::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Near => "near",
            Severity::Moderate => "moderate",
            Severity::Far => "far",
            Severity::Extreme => "extreme",
        }
    }
}

/// One equal-width slice of [-5σ, +5σ]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Bin {
    /// Slice centre in standard deviations from the mean
    pub sigma: f64,
    /// Slice centre in data units
    pub center: f64,
    /// Density at the centre relative to the peak density, in [0, 1]
    pub probability: f64,
    pub severity: Severity,
}

/// Largest finite adjusted density over the mean, a fine grid of
/// [-5σ, +5σ] and the extra points in `centers`
///
/// With skew the mode moves off the mean; including every bin centre keeps
/// all bin weights at or below 1.
pub fn peak_density(params: &DistributionParams, centers: &[f64]) -> f64 {
    let grid = (0..=PEAK_GRID).map(|i| {
        let sigma = -SIGMA_RANGE + 2.0 * SIGMA_RANGE * i as f64 / PEAK_GRID as f64;
        params.value_at_sigma(sigma)
    });
    std::iter::once(params.mean)
        .chain(grid)
        .chain(centers.iter().copied())
        .map(|x| params.density_at(x))
        .filter(|d| d.is_finite())
        .fold(0.0, f64::max)
}

/// Bin a distribution into `num_bins` equal slices of [-5σ, +5σ]
///
/// Weights are normalised by [`peak_density`], so they lie in [0, 1].
/// Non-finite or negative weights become 0.
pub fn bins(params: &DistributionParams, num_bins: usize) -> StatsResult<Vec<Bin>> {
    params.validate()?;
    if num_bins == 0 {
        return Err(StatsError::InvalidParameter {
            name: "num_bins",
            reason: "must be at least 1".to_string(),
        });
    }

    let width = 2.0 * SIGMA_RANGE / num_bins as f64;
    let sigmas: Vec<f64> = (0..num_bins)
        .map(|i| -SIGMA_RANGE + width * (i as f64 + 0.5))
        .collect();
    let centers: Vec<f64> = sigmas.iter().map(|&s| params.value_at_sigma(s)).collect();

    let peak = peak_density(params, &centers);
    if !(peak > 0.0) {
        // The kurtosis term is the usual culprit: a negative exponent zeroes
        // the mean and a fractional one is NaN left of it
        let name = if params.kurtosis == NORMAL_KURTOSIS {
            "skew"
        } else {
            "kurtosis"
        };
        return Err(StatsError::InvalidParameter {
            name,
            reason: format!("density vanishes over [-5σ, +5σ] (peak {})", peak),
        });
    }

    let bins: Vec<Bin> = sigmas
        .into_iter()
        .zip(centers)
        .map(|(sigma, center)| {
            let ratio = params.density_at(center) / peak;
            let probability = if ratio.is_finite() {
                ratio.max(0.0)
            } else {
                0.0
            };
            Bin {
                sigma,
                center,
                probability,
                severity: Severity::from_sigma(sigma),
            }
        })
        .collect();

    tracing::debug!(
        "Binned distribution mean={} sd={} skew={} kurtosis={} into {} bins",
        params.mean,
        params.std_dev,
        params.skew,
        params.kurtosis,
        num_bins
    );

    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_peak() {
        let peak = density(0.0, 0.0, 1.0);
        assert!((peak - 1.0 / (2.0 * PI).sqrt()).abs() < 1e-12);
        assert!(density(0.5, 0.0, 1.0) < peak);
        assert!(density(-0.5, 0.0, 1.0) < peak);
    }

    #[test]
    fn test_density_symmetry() {
        for x in [0.3, 1.0, 2.5] {
            assert!((density(10.0 + x, 10.0, 2.0) - density(10.0 - x, 10.0, 2.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_neutral_skew_density_is_gaussian() {
        for x in [-3.0, -1.2, 0.0, 0.7, 4.0] {
            let g = density(x, 1.0, 1.5);
            let s = skew_density(x, 1.0, 1.5, 0.0, 3.0);
            // erf(0) carries the ~1e-9 residue of the polynomial fit
            assert!((g - s).abs() < 1e-9, "x={} g={} s={}", x, g, s);
        }
    }

    #[test]
    fn test_skew_moves_mass_right() {
        let right = skew_density(1.0, 0.0, 1.0, 4.0, 3.0);
        let left = skew_density(-1.0, 0.0, 1.0, 4.0, 3.0);
        assert!(right > left);
    }

    #[test]
    fn test_kurtosis_adjustment_literal() {
        // kurtosis 6 -> exponent 2 -> extra exp(-0.5 z^2) factor
        let x = 1.0;
        let expected = density(x, 0.0, 1.0) * (-0.5f64).exp();
        assert!((skew_density(x, 0.0, 1.0, 0.0, 6.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_severity() {
        assert_eq!(Severity::from_sigma(0.0), Severity::Near);
        assert_eq!(Severity::from_sigma(-1.0), Severity::Near);
        assert_eq!(Severity::from_sigma(1.5), Severity::Moderate);
        assert_eq!(Severity::from_sigma(-3.0), Severity::Far);
        assert_eq!(Severity::from_sigma(3.01), Severity::Extreme);
        assert_eq!(Severity::Far.label(), "far");
    }

    #[test]
    fn test_bins_standard() {
        let bins = bins(&DistributionParams::standard(), 11).unwrap();
        assert_eq!(bins.len(), 11);

        // Middle bin is centred on the mean
        assert!(bins[5].sigma.abs() < 1e-12);
        assert!((bins[5].probability - 1.0).abs() < 1e-12);

        // Symmetric weights, all in [0, 1]
        for i in 0..11 {
            let p = bins[i].probability;
            assert!((0.0..=1.0).contains(&p));
            assert!((p - bins[10 - i].probability).abs() < 1e-12);
        }
        assert_eq!(bins[0].severity, Severity::Extreme);
        assert_eq!(bins[5].severity, Severity::Near);
    }

    #[test]
    fn test_bins_centers_in_data_units() {
        let params = DistributionParams::gaussian(10.0, 2.0);
        let bins = bins(&params, 10).unwrap();
        assert!((bins[0].sigma + 4.5).abs() < 1e-12);
        assert!((bins[0].center - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bins_fractional_kurtosis_zeroes_left_tail() {
        let params = DistributionParams::standard().with_kurtosis(4.5);
        let bins = bins(&params, 11).unwrap();
        assert_eq!(bins[0].probability, 0.0);
        assert!(bins[10].probability > 0.0);
    }

    #[test]
    fn test_skewed_bins_normalised_by_mode() {
        let bins = bins(&DistributionParams::standard().with_skew(4.0), 11).unwrap();
        let max = bins.iter().map(|b| b.probability).fold(0.0, f64::max);
        assert!(max <= 1.0, "max weight {}", max);
        // the mode sits right of the mean, so the mean bin is not the tallest
        assert!(bins[5].probability < max);
        assert!(max > 0.8);
    }

    #[test]
    fn test_peak_density_at_mode() {
        let params = DistributionParams::standard().with_skew(4.0);
        let peak = peak_density(&params, &[]);
        assert!(peak > params.density_at(params.mean));
        for x in [-1.0, 0.3, 0.7, 1.5] {
            assert!(params.density_at(x) <= peak + 1e-12);
        }
    }

    #[test]
    fn test_vanishing_density_blames_kurtosis() {
        let params = DistributionParams::standard()
            .with_skew(-1e6)
            .with_kurtosis(-1.5);
        match bins(&params, 11) {
            Err(StatsError::InvalidParameter { name, .. }) => assert_eq!(name, "kurtosis"),
            other => panic!("expected kurtosis error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_density_gets_zero_weight() {
        // z^-1 blows up just left of the mean
        let params = DistributionParams::standard().with_kurtosis(-3.0);
        let bins = bins(&params, 1000).unwrap();
        assert!(bins.iter().all(|b| (0.0..=1.0).contains(&b.probability)));
    }

    #[test]
    fn test_neutral_kurtosis_is_exact_match() {
        // 3 skips the factor; a hair above 3 applies it
        let x = 1.0;
        let neutral = skew_density(x, 0.0, 1.0, 0.0, 3.0);
        let near = skew_density(x, 0.0, 1.0, 0.0, 3.0 + 1e-12);
        assert!((near - neutral * (-0.5f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_bins_invalid() {
        assert!(bins(&DistributionParams::gaussian(0.0, 0.0), 11).is_err());
        assert!(bins(&DistributionParams::gaussian(0.0, -1.0), 11).is_err());
        assert!(bins(&DistributionParams::gaussian(f64::NAN, 1.0), 11).is_err());
        assert!(bins(&DistributionParams::standard(), 0).is_err());
    }
}
