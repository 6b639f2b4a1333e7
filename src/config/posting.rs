//! Posting lifecycle configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::posting::MAX_EXPIRY_DAYS;

use super::error::ValidationError;

/// Defaults and limits for posting handlers and the expiry reaper.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingConfig {
    /// Ceiling applied when a new posting does not name one
    #[serde(default = "default_max_applications")]
    pub default_max_applications: u32,

    /// Publication window applied when publish does not name one
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: u32,

    /// Save attempts for application intake under contention
    #[serde(default = "default_retry_attempts")]
    pub application_retry_attempts: u32,

    /// Seconds between expiry sweeps
    #[serde(default = "default_reaper_interval")]
    pub reaper_interval_secs: u64,

    /// Maximum postings closed per sweep
    #[serde(default = "default_reaper_batch_size")]
    pub reaper_batch_size: usize,
}

impl PostingConfig {
    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs)
    }

    /// Validate posting configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_max_applications == 0 {
            return Err(ValidationError::InvalidMaxApplications);
        }
        if self.default_expiry_days == 0 || self.default_expiry_days > MAX_EXPIRY_DAYS {
            return Err(ValidationError::InvalidExpiryDays {
                max: MAX_EXPIRY_DAYS,
                actual: self.default_expiry_days,
            });
        }
        if self.application_retry_attempts == 0 || self.application_retry_attempts > 20 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        if self.reaper_interval_secs == 0 || self.reaper_interval_secs > 86_400 {
            return Err(ValidationError::InvalidReaperInterval);
        }
        if self.reaper_batch_size == 0 || self.reaper_batch_size > 10_000 {
            return Err(ValidationError::InvalidReaperBatchSize);
        }
        Ok(())
    }
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            default_max_applications: default_max_applications(),
            default_expiry_days: default_expiry_days(),
            application_retry_attempts: default_retry_attempts(),
            reaper_interval_secs: default_reaper_interval(),
            reaper_batch_size: default_reaper_batch_size(),
        }
    }
}

fn default_max_applications() -> u32 {
    50
}

fn default_expiry_days() -> u32 {
    30
}

fn default_retry_attempts() -> u32 {
    5
}

fn default_reaper_interval() -> u64 {
    60
}

fn default_reaper_batch_size() -> usize {
    100
}
