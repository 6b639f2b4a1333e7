//! ClosePostingHandler - Command handler for closing postings.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, SponsorId};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Command to stop a posting from taking applications.
#[derive(Debug, Clone)]
pub struct ClosePostingCommand {
    pub posting_id: PostingId,
    pub sponsor_id: SponsorId,
    pub reason: String,
}

/// Handler for closing postings.
pub struct ClosePostingHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ClosePostingHandler {
    pub fn new(
        repository: Arc<dyn PostingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ClosePostingCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.authorize(&cmd.sponsor_id)?;

        posting.close(cmd.reason.trim())?;

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::info!(posting_id = %posting.id(), reason = %cmd.reason, "Posting closed");
        Ok(posting)
    }
}
