//! MarkPostingFilledHandler - Command handler for recording a hire.

use std::sync::Arc;

use crate::domain::foundation::{CandidateId, CommandMetadata, ContractId, PostingId, SponsorId};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Command to mark a posting filled by a signed contract.
#[derive(Debug, Clone)]
pub struct MarkPostingFilledCommand {
    pub posting_id: PostingId,
    pub sponsor_id: SponsorId,
    pub candidate_id: CandidateId,
    pub contract_id: ContractId,
}

/// Handler for filling postings.
pub struct MarkPostingFilledHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl MarkPostingFilledHandler {
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
        cmd: MarkPostingFilledCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.authorize(&cmd.sponsor_id)?;

        posting.mark_as_filled(cmd.candidate_id, cmd.contract_id)?;

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::info!(
            posting_id = %posting.id(),
            candidate_id = %cmd.candidate_id,
            contract_id = %cmd.contract_id,
            "Posting filled"
        );
        Ok(posting)
    }
}
