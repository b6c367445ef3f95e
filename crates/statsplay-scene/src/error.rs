//! Error types for statsplay-scene
//!
//! Provides error handling for:
//! - Statistics failures bubbling up from statsplay-stats
//! - Config loading and validation
//! - Layouts that cannot fit the canvas

use statsplay_stats::StatsError;
use thiserror::Error;

/// Main error type for scene construction
#[derive(Error, Debug)]
pub enum SceneError {
    /// Invalid input to a statistics operation
    #[error("Invalid input: {0}")]
    Stats(#[from] StatsError),

    /// Config failed validation or could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A parameter outside its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The requested layout does not fit the canvas
    #[error("Layout does not fit: {0}")]
    Layout(String),
}

/// Errors related to scene configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// TOML parsing error
    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[cfg(feature = "toml-config")]
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Result type alias for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;
