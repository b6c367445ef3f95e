//! Special functions behind the densities and the slope test
//!
//! - [`erf`]: Abramowitz & Stegun 7.1.26 (max abs error about 1.5e-7)
//! - [`normal_cdf`]: standard normal CDF built on [`erf`]
//! - [`two_sided_t_p_value`]: slope test p-value from `statrs`' Student's t

use std::f64::consts::SQRT_2;

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{StatsError, StatsResult};

const ERF_P: f64 = 0.3275911;
const ERF_A: [f64; 5] = [
    0.254829592,
    -0.284496736,
    1.421413741,
    -1.453152027,
    1.061405429,
];

/// Error function, Abramowitz & Stegun formula 7.1.26
pub fn erf(x: f64) -> f64 {
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ((((ERF_A[4] * t + ERF_A[3]) * t + ERF_A[2]) * t + ERF_A[1]) * t + ERF_A[0]) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal CDF, `0.5 * (1 + erf(x / sqrt(2)))`
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Two-sided p-value of a t statistic with `df` degrees of freedom
///
/// `2 * (1 - F(|t|))`, clamped to [0, 1]. Fails for `df <= 0` or NaN.
pub fn two_sided_t_p_value(t: f64, df: f64) -> StatsResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::InvalidParameter {
        name: "df",
        reason: e.to_string(),
    })?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    Ok(p.clamp(0.0, 1.0))
}
