//! PublishPostingHandler - Command handler for taking a draft live.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, SponsorId};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Publication window used when the command does not name one.
pub const DEFAULT_EXPIRY_DAYS: u32 = 30;

/// Command to publish a draft.
#[derive(Debug, Clone)]
pub struct PublishPostingCommand {
    pub posting_id: PostingId,
    pub sponsor_id: SponsorId,
    pub expiry_days: Option<u32>,
}

/// Handler for publishing postings.
pub struct PublishPostingHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    default_expiry_days: u32,
}

impl PublishPostingHandler {
    pub fn new(
        repository: Arc<dyn PostingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            default_expiry_days: DEFAULT_EXPIRY_DAYS,
        }
    }

    pub fn with_default_expiry_days(mut self, days: u32) -> Self {
        self.default_expiry_days = days;
        self
    }

    pub async fn handle(
        &self,
        cmd: PublishPostingCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.authorize(&cmd.sponsor_id)?;

        let expiry_days = cmd.expiry_days.unwrap_or(self.default_expiry_days);
        if let Err(err) = posting.publish(expiry_days) {
            if let PostingError::PublishPreconditionFailed { missing } = &err {
                tracing::info!(
                    posting_id = %posting.id(),
                    missing = ?missing,
                    "Posting not ready to publish"
                );
            }
            return Err(err);
        }

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::info!(
            posting_id = %posting.id(),
            expiry_days,
            "Posting published"
        );
        Ok(posting)
    }
}
