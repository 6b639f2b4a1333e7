//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),

    #[error("Default max applications must be at least 1")]
    InvalidMaxApplications,

    #[error("Default expiry days must be between 1 and {max}, got {actual}")]
    InvalidExpiryDays { max: u32, actual: u32 },

    #[error("Application retry attempts must be between 1 and 20")]
    InvalidRetryAttempts,

    #[error("Reaper interval must be between 1 and 86400 seconds")]
    InvalidReaperInterval,

    #[error("Reaper batch size must be between 1 and 10000")]
    InvalidReaperBatchSize,
}
