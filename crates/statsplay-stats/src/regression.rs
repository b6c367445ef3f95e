//! Ordinary least squares line fitting
//!
//! Fits `y = slope * x + intercept` and reports goodness-of-fit metrics:
//!
//! | metric | definition |
//! |--------|------------|
//! | SSE    | `Σ (y_i - ŷ_i)²` |
//! | SSR    | `Σ (ŷ_i - ȳ)²` |
//! | SST    | `Σ (y_i - ȳ)²` |
//! | MSE    | `SSE / n` |
//! | MSR    | `SSR / n` |
//! | R²     | `SSR / SST` (0 when SST is 0) |
//!
//! The slope test uses `se = sqrt(MSE / Σ (x_i - x̄)²)`, `t = slope / se` and
//! a two-sided p-value from Student's t with `n - 2` degrees of freedom.

use serde::{Deserialize, Serialize};

use crate::error::{validation, StatsError, StatsResult};
use crate::special::two_sided_t_p_value;

/// Result of fitting (or evaluating) a line against paired data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Mean squared error, `SSE / n`
    pub mse: f64,
    /// Mean square due to regression, `SSR / n`
    pub msr: f64,
    /// Total sum of squares
    pub sst: f64,
    pub r_squared: f64,
    /// Two-sided p-value of the slope; NaN with only two points
    pub p_value: f64,
    /// Standard error of the slope
    pub std_error: f64,
    pub t_statistic: f64,
    /// Number of points
    pub n: usize,
}

impl FitResult {
    /// Predicted y for a given x
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Whether the slope is significant at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Means and centred sums shared by the fit and the metrics
struct Moments {
    n: usize,
    mean_x: f64,
    mean_y: f64,
    sxx: f64,
    sxy: f64,
}

impl Moments {
    fn from_pairs(x: &[f64], y: &[f64]) -> StatsResult<Self> {
        if x.len() != y.len() {
            return Err(StatsError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(StatsError::TooFewPoints {
                required: 2,
                actual: x.len(),
            });
        }
        validation::finite_sample("x", x)?;
        validation::finite_sample("y", y)?;

        let n = x.len();
        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;
        let (sxx, sxy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - mean_x;
            (sxx + dx * dx, sxy + dx * (yi - mean_y))
        });

        if sxx == 0.0 {
            return Err(StatsError::ZeroVariance("x"));
        }

        Ok(Self {
            n,
            mean_x,
            mean_y,
            sxx,
            sxy,
        })
    }

    fn ols(&self) -> (f64, f64) {
        let slope = self.sxy / self.sxx;
        (slope, self.mean_y - slope * self.mean_x)
    }
}

/// Fit the least squares line through `(x, y)`
///
/// Requires equal lengths, at least two points and non-constant `x`.
pub fn fit(x: &[f64], y: &[f64]) -> StatsResult<FitResult> {
    let moments = Moments::from_pairs(x, y)?;
    let (slope, intercept) = moments.ols();
    metrics(&moments, slope, intercept, x, y)
}

/// Evaluate the fit metrics for an arbitrary candidate line
///
/// Same validation as [`fit`]. Useful when the line comes from the user
/// rather than from least squares.
pub fn line_metrics(slope: f64, intercept: f64, x: &[f64], y: &[f64]) -> StatsResult<FitResult> {
    validation::finite("slope", slope)?;
    validation::finite("intercept", intercept)?;
    let moments = Moments::from_pairs(x, y)?;
    metrics(&moments, slope, intercept, x, y)
}

/// Whether a candidate line is within `epsilon` of the OLS line
///
/// Both the slope and the intercept must be strictly closer than
/// `epsilon` to the optimum.
pub fn matches_fit(
    candidate_slope: f64,
    candidate_intercept: f64,
    x: &[f64],
    y: &[f64],
    epsilon: f64,
) -> StatsResult<bool> {
    validation::finite("epsilon", epsilon)?;
    if epsilon < 0.0 {
        return Err(StatsError::InvalidParameter {
            name: "epsilon",
            reason: format!("must be non-negative, got {}", epsilon),
        });
    }

    let (slope, intercept) = Moments::from_pairs(x, y)?.ols();
    Ok((candidate_slope - slope).abs() < epsilon
        && (candidate_intercept - intercept).abs() < epsilon)
}

fn metrics(
    moments: &Moments,
    slope: f64,
    intercept: f64,
    x: &[f64],
    y: &[f64],
) -> StatsResult<FitResult> {
    let n = moments.n;
    let mean_y = moments.mean_y;

    let (sse, ssr, sst) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0, 0.0), |(sse, ssr, sst), (&xi, &yi)| {
            let predicted = slope * xi + intercept;
            (
                sse + (yi - predicted).powi(2),
                ssr + (predicted - mean_y).powi(2),
                sst + (yi - mean_y).powi(2),
            )
        });

    let mse = sse / n as f64;
    let msr = ssr / n as f64;
    let r_squared = if sst == 0.0 {
        tracing::debug!("Constant y: R² reported as 0");
        0.0
    } else {
        ssr / sst
    };

    let std_error = (mse / moments.sxx).sqrt();
    let t_statistic = if std_error > 0.0 {
        slope / std_error
    } else if slope == 0.0 {
        0.0
    } else {
        // Exact fit: the slope is known without error
        slope.signum() * f64::INFINITY
    };

    let df = n as f64 - 2.0;
    let p_value = if df > 0.0 {
        two_sided_t_p_value(t_statistic, df)?
    } else {
        tracing::debug!("Slope p-value undefined with {} points", n);
        f64::NAN
    };

    Ok(FitResult {
        slope,
        intercept,
        mse,
        msr,
        sst,
        r_squared,
        p_value,
        std_error,
        t_statistic,
        n,
    })
}
