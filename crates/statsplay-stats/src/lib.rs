//! statsplay-stats - Descriptive statistics for physics-based teaching demos
//!
//! This crate provides the statistics behind the statsplay scenes:
//!
//! - **Quantiles**: linear interpolation between order statistics
//! - **Outliers**: IQR fences, with a variant that keeps missing markers
//! - **Distributions**: Gaussian and skew-normal densities, sigma binning
//! - **Regression**: least squares fits, goodness of fit and slope p-values
//!
//! # Design Philosophy
//!
//! Every operation is a pure function of its inputs. Invalid input is
//! rejected up front with a [`StatsError`]; nothing is clamped, guessed or
//! partially computed.

pub mod distribution;
pub mod error;
pub mod outliers;
pub mod quantile;
pub mod regression;
pub mod sample;
pub mod special;
pub mod summary;

pub use distribution::*;
pub use error::{StatsError, StatsResult};
pub use outliers::*;
pub use quantile::*;
pub use regression::*;
pub use sample::*;
pub use summary::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
