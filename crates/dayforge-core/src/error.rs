//! Core error types for dayforge-core.
//!
//! The scheduler itself never fails; these errors cover everything around it:
//! parsing user input, loading configuration and reading or writing plans.

use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskType;

/// Core error type for dayforge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Plan file could not be decoded
    #[error("Corrupt plan file at {path}: {source}")]
    CorruptPlan {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Home or data directory could not be prepared
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Time-of-day string is not "HH:mm"
    #[error("Invalid time of day '{value}': expected HH:mm")]
    InvalidTimeOfDay { value: String },

    /// Work hour range is out of bounds or inverted
    #[error("Invalid hour range {min}-{max}: {message}")]
    InvalidHourRange { min: f64, max: f64, message: String },

    /// Hour ranges only apply to work tasks
    #[error("Hour ranges are only supported for work tasks, got '{0}'")]
    RangeOnNonWork(TaskType),

    /// Type is synthesized by the scheduler and cannot be entered by a user
    #[error("Task type '{0}' is created by the scheduler and cannot be added manually")]
    NotUserCreatable(TaskType),

    /// Unknown task type name
    #[error("Unknown task type '{0}'")]
    UnknownTaskType(String),

    /// Unknown intensity name
    #[error("Unknown intensity '{0}': expected low, medium or high")]
    UnknownIntensity(String),

    /// Date string is not YYYY-MM-DD
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
