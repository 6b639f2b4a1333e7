//! ExpiryReaper - Background service that closes expired postings.
//!
//! Postings never close themselves when their expiry passes. The reaper
//! issues a `CloseExpiredPostingsCommand` on a fixed interval.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 60s | Time between sweeps |
//! | `batch_size` | 100 | Max postings closed per sweep |
//!
//! ## Graceful Shutdown
//!
//! The service listens on a watch channel and runs one final sweep before
//! returning.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::application::handlers::posting::{
    CloseExpiredPostingsCommand, CloseExpiredPostingsHandler, CloseExpiredPostingsResult,
};
use crate::domain::foundation::{CommandMetadata, Timestamp, UserId};
use crate::domain::posting::PostingError;

/// Identity recorded on events the reaper causes.
pub const REAPER_USER: &str = "system:expiry-reaper";

/// Configuration for the ExpiryReaper service.
#[derive(Debug, Clone)]
pub struct ExpiryReaperConfig {
    /// Time between sweeps.
    pub interval: Duration,

    /// Maximum postings closed per sweep.
    pub batch_size: usize,
}

impl Default for ExpiryReaperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            batch_size: 100,
        }
    }
}

impl ExpiryReaperConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }
}

/// Periodically closes open postings whose expiry has passed.
pub struct ExpiryReaper {
    handler: CloseExpiredPostingsHandler,
    config: ExpiryReaperConfig,
}

impl ExpiryReaper {
    pub fn new(handler: CloseExpiredPostingsHandler) -> Self {
        Self {
            handler,
            config: ExpiryReaperConfig::default(),
        }
    }

    pub fn with_config(handler: CloseExpiredPostingsHandler, config: ExpiryReaperConfig) -> Self {
        Self { handler, config }
    }

    /// Run sweeps until the shutdown signal is received.
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            batch_size = self.config.batch_size,
            "Expiry reaper started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender also means shutdown.
                    if changed.is_err() || *shutdown.borrow() {
                        self.sweep_logged().await;
                        tracing::info!("Expiry reaper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep_logged().await;
                }
            }
        }
    }

    /// Run exactly one sweep at the current time.
    pub async fn sweep_once(&self) -> Result<CloseExpiredPostingsResult, PostingError> {
        self.sweep_at(Timestamp::now()).await
    }

    /// Run one sweep as if the clock read `now`.
    pub async fn sweep_at(&self, now: Timestamp) -> Result<CloseExpiredPostingsResult, PostingError> {
        let metadata = Self::metadata()?;
        self.handler
            .handle(
                CloseExpiredPostingsCommand {
                    now,
                    batch_size: self.config.batch_size,
                },
                metadata,
            )
            .await
    }

    async fn sweep_logged(&self) {
        if let Err(err) = self.sweep_once().await {
            tracing::warn!(error = %err, code = %err.code(), "Expiry sweep failed");
        }
    }

    fn metadata() -> Result<CommandMetadata, PostingError> {
        let user_id = UserId::new(REAPER_USER)?;
        Ok(CommandMetadata::new(user_id).with_source("scheduler"))
    }
}
