//! Shared application state for posting handlers.
//!
//! Holds the ports and the posting configuration, and builds handlers on
//! demand with the configured defaults applied.

use std::sync::Arc;

use crate::config::PostingConfig;
use crate::ports::{EventPublisher, PostingRepository};

use super::handlers::posting::{
    CancelPostingHandler, CloseExpiredPostingsHandler, ClosePostingHandler, CreatePostingHandler,
    FindMatchingJobsHandler, MarkPostingFilledHandler, PublishPostingHandler,
    RecordApplicationHandler, RecordViewHandler, UpdateCompensationHandler,
    UpdatePostingDetailsHandler,
};
use super::reaper::{ExpiryReaper, ExpiryReaperConfig};

/// Shared state containing all posting dependencies.
///
/// Cheap to clone; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct PostingAppState {
    pub posting_repository: Arc<dyn PostingRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
    pub config: PostingConfig,
}

impl PostingAppState {
    pub fn new(
        posting_repository: Arc<dyn PostingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        config: PostingConfig,
    ) -> Self {
        Self {
            posting_repository,
            event_publisher,
            config,
        }
    }

    pub fn create_posting_handler(&self) -> CreatePostingHandler {
        CreatePostingHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
        .with_default_max_applications(self.config.default_max_applications)
    }

    pub fn update_details_handler(&self) -> UpdatePostingDetailsHandler {
        UpdatePostingDetailsHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn update_compensation_handler(&self) -> UpdateCompensationHandler {
        UpdateCompensationHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn publish_posting_handler(&self) -> PublishPostingHandler {
        PublishPostingHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
        .with_default_expiry_days(self.config.default_expiry_days)
    }

    pub fn record_application_handler(&self) -> RecordApplicationHandler {
        RecordApplicationHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
        .with_max_attempts(self.config.application_retry_attempts)
    }

    pub fn record_view_handler(&self) -> RecordViewHandler {
        RecordViewHandler::new(self.posting_repository.clone())
    }

    pub fn close_posting_handler(&self) -> ClosePostingHandler {
        ClosePostingHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn mark_filled_handler(&self) -> MarkPostingFilledHandler {
        MarkPostingFilledHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn cancel_posting_handler(&self) -> CancelPostingHandler {
        CancelPostingHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn close_expired_handler(&self) -> CloseExpiredPostingsHandler {
        CloseExpiredPostingsHandler::new(
            self.posting_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn find_matching_jobs_handler(&self) -> FindMatchingJobsHandler {
        FindMatchingJobsHandler::new(self.posting_repository.clone())
    }

    /// Expiry reaper using the configured interval and batch size.
    pub fn expiry_reaper(&self) -> ExpiryReaper {
        ExpiryReaper::with_config(
            self.close_expired_handler(),
            ExpiryReaperConfig::default()
                .with_interval(self.config.reaper_interval())
                .with_batch_size(self.config.reaper_batch_size),
        )
    }
}
