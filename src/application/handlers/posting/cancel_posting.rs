//! CancelPostingHandler - Command handler for withdrawing postings.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, SponsorId};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Command to withdraw a posting.
#[derive(Debug, Clone)]
pub struct CancelPostingCommand {
    pub posting_id: PostingId,
    pub sponsor_id: SponsorId,
    pub reason: String,
}

/// Handler for cancelling postings.
pub struct CancelPostingHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CancelPostingHandler {
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
        cmd: CancelPostingCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.authorize(&cmd.sponsor_id)?;

        posting.cancel(cmd.reason.trim())?;

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::info!(posting_id = %posting.id(), reason = %cmd.reason, "Posting cancelled");
        Ok(posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::posting::test_support::{metadata, Fixture};
    use crate::domain::foundation::{CandidateId, ContractId};
    use crate::domain::posting::PostingStatus;

    fn command(posting: &Posting) -> CancelPostingCommand {
        CancelPostingCommand {
            posting_id: posting.id(),
            sponsor_id: posting.sponsor_id(),
            reason: "budget cut".to_string(),
        }
    }

    #[tokio::test]
    async fn cancels_open_posting() {
        let fx = Fixture::new();
        let open = fx.open(SponsorId::new(), 5).await;

        CancelPostingHandler::new(fx.repository.clone(), fx.bus.clone())
            .handle(command(&open), metadata())
            .await
            .unwrap();

        assert_eq!(fx.reload(open.id()).await.status(), PostingStatus::Cancelled);
        assert_eq!(fx.event_types(), vec!["job_posting.cancelled.v1"]);
    }

    #[tokio::test]
    async fn filled_posting_cannot_be_cancelled() {
        let fx = Fixture::new();
        let mut open = fx.open(SponsorId::new(), 5).await;
        open.mark_as_filled(CandidateId::new(), ContractId::new())
            .unwrap();
        open.pull_events();
        fx.repository.save(&mut open).await.unwrap();

        let result = CancelPostingHandler::new(fx.repository.clone(), fx.bus.clone())
            .handle(command(&open), metadata())
            .await;

        assert_eq!(result.unwrap_err(), PostingError::CannotCancelFilled);
        assert_eq!(fx.reload(open.id()).await.status(), PostingStatus::Filled);
        assert_eq!(fx.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn second_cancel_is_rejected() {
        let fx = Fixture::new();
        let draft = fx.draft(SponsorId::new(), 5).await;
        let handler = CancelPostingHandler::new(fx.repository.clone(), fx.bus.clone());

        handler.handle(command(&draft), metadata()).await.unwrap();
        let second = handler.handle(command(&draft), metadata()).await;

        assert_eq!(second.unwrap_err(), PostingError::AlreadyCancelled);
    }
}
