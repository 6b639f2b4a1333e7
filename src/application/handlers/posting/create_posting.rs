//! CreatePostingHandler - Command handler for drafting postings.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, SponsorId};
use crate::domain::posting::{Compensation, Posting, PostingDetails, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::publish_pending;

/// Ceiling used when the command does not name one.
pub const DEFAULT_MAX_APPLICATIONS: u32 = 50;

/// Command to draft a new posting.
#[derive(Debug, Clone)]
pub struct CreatePostingCommand {
    pub sponsor_id: SponsorId,
    pub details: PostingDetails,
    pub compensation: Option<Compensation>,
    pub max_applications: Option<u32>,
}

/// Handler for drafting postings.
pub struct CreatePostingHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    default_max_applications: u32,
}

impl CreatePostingHandler {
    pub fn new(
        repository: Arc<dyn PostingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            default_max_applications: DEFAULT_MAX_APPLICATIONS,
        }
    }

    pub fn with_default_max_applications(mut self, max_applications: u32) -> Self {
        self.default_max_applications = max_applications;
        self
    }

    pub async fn handle(
        &self,
        cmd: CreatePostingCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let max_applications = cmd
            .max_applications
            .unwrap_or(self.default_max_applications);

        let mut posting =
            Posting::create(PostingId::new(), cmd.sponsor_id, cmd.details, max_applications)?;
        if let Some(compensation) = cmd.compensation {
            posting.update_compensation(compensation)?;
        }

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::info!(
            posting_id = %posting.id(),
            sponsor_id = %posting.sponsor_id(),
            max_applications,
            "Posting drafted"
        );
        Ok(posting)
    }
}
