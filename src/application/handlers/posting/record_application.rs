//! RecordApplicationHandler - Command handler for application intake.
//!
//! Two callers may both load a posting one short of its ceiling. The
//! repository rejects the second save with a conflict; this handler then
//! reloads and re-runs the domain check, so the ceiling holds across
//! concurrent requests.

use std::sync::Arc;

use crate::domain::foundation::{CandidateId, CommandMetadata, PostingId};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

use super::{load_posting, publish_pending};

/// Save attempts made before a conflict is returned to the caller.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Command to count one application against a posting.
#[derive(Debug, Clone)]
pub struct RecordApplicationCommand {
    pub posting_id: PostingId,
    pub candidate_id: CandidateId,
}

/// Result of a recorded application.
#[derive(Debug, Clone)]
pub struct RecordApplicationResult {
    pub posting: Posting,
    /// True when this application reached the ceiling and closed the posting.
    pub auto_closed: bool,
    /// Save attempts used, 1 when there was no contention.
    pub attempts: u32,
}

/// Handler for application intake.
pub struct RecordApplicationHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    max_attempts: u32,
}

impl RecordApplicationHandler {
    pub fn new(
        repository: Arc<dyn PostingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the attempt budget; values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub async fn handle(
        &self,
        cmd: RecordApplicationCommand,
        metadata: CommandMetadata,
    ) -> Result<RecordApplicationResult, PostingError> {
        let mut attempt = 1;

        loop {
            let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
            posting.record_application()?;

            match self.repository.save(&mut posting).await {
                Ok(()) => {
                    let auto_closed = posting.status().is_closed();
                    publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata)
                        .await?;

                    tracing::info!(
                        posting_id = %posting.id(),
                        candidate_id = %cmd.candidate_id,
                        application_count = posting.application_count(),
                        max_applications = posting.max_applications(),
                        auto_closed,
                        attempt,
                        "Application recorded"
                    );
                    return Ok(RecordApplicationResult {
                        posting,
                        auto_closed,
                        attempts: attempt,
                    });
                }
                Err(err) => {
                    let err = PostingError::from(err);
                    if !err.is_conflict() || attempt >= self.max_attempts {
                        return Err(err);
                    }
                    tracing::debug!(
                        posting_id = %cmd.posting_id,
                        attempt,
                        "Concurrent update on posting, retrying application"
                    );
                    attempt += 1;
                    tokio::task::yield_now().await;
                }
            }
        }
    }
}
