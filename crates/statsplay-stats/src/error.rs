//! Error types for statsplay-stats
//!
//! Every failure in the engine is an input-validation failure detected
//! before any computation starts. There is no partial result and nothing
//! to retry: the caller is expected to ask the user for better input.

use thiserror::Error;

/// Error type for all statistics operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// The sample has no (numeric) values
    #[error("Sample is empty")]
    EmptySample,

    /// A value or parameter is NaN or infinite
    #[error("Non-finite value for {name}: {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// A quantile query outside [0, 1]
    #[error("Probability {0} is outside [0, 1]")]
    ProbabilityOutOfRange(f64),

    /// Paired sequences of different lengths
    #[error("Length mismatch: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    /// Not enough points for the requested computation
    #[error("Need at least {required} values, got {actual}")]
    TooFewPoints { required: usize, actual: usize },

    /// All values of a sequence are equal
    #[error("Zero variance in {0}")]
    ZeroVariance(&'static str),

    /// A parameter outside its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl StatsError {
    /// Whether this error belongs to the invalid-input category.
    ///
    /// Always true today; kept so callers can match on the category
    /// rather than on individual variants.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StatsError::EmptySample
                | StatsError::NonFinite { .. }
                | StatsError::ProbabilityOutOfRange(_)
                | StatsError::LengthMismatch { .. }
                | StatsError::TooFewPoints { .. }
                | StatsError::ZeroVariance(_)
                | StatsError::InvalidParameter { .. }
        )
    }
}

/// Result type alias for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;

/// Input validation helpers shared by the engine modules
pub(crate) mod validation {
    use super::*;

    /// Reject NaN and infinities in a named parameter
    pub fn finite(name: &'static str, value: f64) -> StatsResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(StatsError::NonFinite { name, value })
        }
    }

    /// Reject empty samples and samples containing non-finite values
    pub fn finite_sample(name: &'static str, data: &[f64]) -> StatsResult<()> {
        if data.is_empty() {
            return Err(StatsError::EmptySample);
        }
        match data.iter().find(|v| !v.is_finite()) {
            Some(&value) => Err(StatsError::NonFinite { name, value }),
            None => Ok(()),
        }
    }

    /// Reject probabilities outside [0, 1] (NaN included)
    pub fn probability(p: f64) -> StatsResult<f64> {
        if (0.0..=1.0).contains(&p) {
            Ok(p)
        } else {
            Err(StatsError::ProbabilityOutOfRange(p))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatsError::LengthMismatch { x: 3, y: 4 };
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("4"));

        let err = StatsError::ProbabilityOutOfRange(1.5);
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_all_errors_are_invalid_input() {
        assert!(StatsError::EmptySample.is_invalid_input());
        assert!(StatsError::ZeroVariance("x").is_invalid_input());
        assert!(StatsError::InvalidParameter {
            name: "num_bins",
            reason: "must be positive".to_string()
        }
        .is_invalid_input());
    }

    #[test]
    fn test_validate_finite_sample() {
        assert!(validation::finite_sample("sample", &[1.0, 2.0]).is_ok());
        assert_eq!(
            validation::finite_sample("sample", &[]),
            Err(StatsError::EmptySample)
        );
        assert!(validation::finite_sample("sample", &[1.0, f64::NAN]).is_err());
        assert!(validation::finite_sample("sample", &[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_validate_probability() {
        assert!(validation::probability(0.0).is_ok());
        assert!(validation::probability(1.0).is_ok());
        assert!(validation::probability(-0.01).is_err());
        assert!(validation::probability(f64::NAN).is_err());
    }
}
