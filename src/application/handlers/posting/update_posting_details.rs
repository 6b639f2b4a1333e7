//! UpdatePostingDetailsHandler - Command handler for editing draft details.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, SponsorId};
use crate::domain::posting::{Posting, PostingDetails, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Command to replace a draft's descriptive attributes.
#[derive(Debug, Clone)]
pub struct UpdatePostingDetailsCommand {
    pub posting_id: PostingId,
    pub sponsor_id: SponsorId,
    pub details: PostingDetails,
}

/// Handler for editing draft details.
pub struct UpdatePostingDetailsHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdatePostingDetailsHandler {
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
        cmd: UpdatePostingDetailsCommand,
        metadata: CommandMetadata,
    ) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.authorize(&cmd.sponsor_id)?;

        posting.update_details(cmd.details)?;

        self.repository.save(&mut posting).await?;
        publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;

        tracing::debug!(posting_id = %posting.id(), "Posting details updated");
        Ok(posting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::posting::test_support::{
        complete_details, metadata, Fixture,
    };

    fn handler(fx: &Fixture) -> UpdatePostingDetailsHandler {
        UpdatePostingDetailsHandler::new(fx.repository.clone(), fx.bus.clone())
    }

    fn renamed(title: &str) -> PostingDetails {
        PostingDetails {
            title: title.to_string(),
            ..complete_details()
        }
    }

    #[tokio::test]
    async fn owner_updates_draft() {
        let fx = Fixture::new();
        let sponsor_id = SponsorId::new();
        let draft = fx.draft(sponsor_id, 5).await;

        handler(&fx)
            .handle(
                UpdatePostingDetailsCommand {
                    posting_id: draft.id(),
                    sponsor_id,
                    details: renamed("Night-shift Caregiver"),
                },
                metadata(),
            )
            .await
            .unwrap();

        assert_eq!(fx.reload(draft.id()).await.title(), "Night-shift Caregiver");
        assert_eq!(fx.event_types(), vec!["job_posting.details_updated.v1"]);
    }

    #[tokio::test]
    async fn other_sponsor_is_forbidden() {
        let fx = Fixture::new();
        let draft = fx.draft(SponsorId::new(), 5).await;

        let result = handler(&fx)
            .handle(
                UpdatePostingDetailsCommand {
                    posting_id: draft.id(),
                    sponsor_id: SponsorId::new(),
                    details: renamed("Hijacked"),
                },
                metadata(),
            )
            .await;

        assert_eq!(result.unwrap_err(), PostingError::Forbidden);
        assert_eq!(fx.reload(draft.id()).await.title(), draft.title());
    }

    #[tokio::test]
    async fn open_posting_cannot_be_edited() {
        let fx = Fixture::new();
        let sponsor_id = SponsorId::new();
        let open = fx.open(sponsor_id, 5).await;

        let result = handler(&fx)
            .handle(
                UpdatePostingDetailsCommand {
                    posting_id: open.id(),
                    sponsor_id,
                    details: renamed("Too late"),
                },
                metadata(),
            )
            .await;

        assert!(matches!(result, Err(PostingError::EditNotPermitted(_))));
        assert_eq!(fx.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn missing_posting_is_not_found() {
        let fx = Fixture::new();
        let id = PostingId::new();

        let result = handler(&fx)
            .handle(
                UpdatePostingDetailsCommand {
                    posting_id: id,
                    sponsor_id: SponsorId::new(),
                    details: complete_details(),
                },
                metadata(),
            )
            .await;

        assert_eq!(result.unwrap_err(), PostingError::NotFound(id));
    }
}
