//! UpdateCompensationHandler - Command handler for changing a draft's pay offer.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, SponsorId};
use crate::domain::posting::{Compensation, Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Command to replace a draft's compensation.
#[derive(Debug, Clone)]
pub struct UpdateCompensationCommand {
    pub posting_id: PostingId,
    pub sponsor_id: SponsorId,
    pub compensation: Compensation,
}

/// Handler for changing compensation.
pub struct UpdateCompensationHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateCompensationHandler {
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
        cmd: UpdateCompensationCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.authorize(&cmd.sponsor_id)?;

        posting.update_compensation(cmd.compensation)?;

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::debug!(posting_id = %posting.id(), "Posting compensation updated");
        Ok(posting)
    }
}
