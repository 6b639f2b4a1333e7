//! CloseExpiredPostingsHandler - Sweeps open postings past their expiry.
//!
//! Expiry on the aggregate is a passive read; this command is what turns an
//! expired open posting into a closed one. It is issued periodically by the
//! expiry reaper.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, PostingId, Timestamp};
use crate::domain::posting::PostingError;
use crate::ports::{EventPublisher, PostingRepository};

use super::publish_pending;

/// Close reason recorded for expired postings.
pub const EXPIRY_REASON: &str = "posting expired";

/// Command to close open postings whose expiry is before `now`.
#[derive(Debug, Clone)]
pub struct CloseExpiredPostingsCommand {
    pub now: Timestamp,
    pub batch_size: usize,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseExpiredPostingsResult {
    /// Postings closed by this sweep.
    pub closed: Vec<PostingId>,
    /// Postings left alone because another writer changed them first.
    pub skipped: usize,
}

/// Handler for expiry sweeps.
pub struct CloseExpiredPostingsHandler {
    repository: Arc<dyn PostingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CloseExpiredPostingsHandler {
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
        cmd: CloseExpiredPostingsCommand,
        metadata: CommandMetadata,
    ) -> Result<CloseExpiredPostingsResult, PostingError> {
        let expired = self
            .repository
            .find_expired_open(cmd.now, cmd.batch_size)
            .await?;

        let mut result = CloseExpiredPostingsResult::default();
        for mut posting in expired {
            posting.close(EXPIRY_REASON)?;

            if let Err(err) = self.repository.save(&mut posting).await {
                let err = PostingError::from(err);
                if !err.is_conflict() {
                    return Err(err);
                }
                // Picked up again on the next sweep if it is still open.
                tracing::debug!(
                    posting_id = %posting.id(),
                    "Expired posting changed during sweep, skipping"
                );
                result.skipped += 1;
                continue;
            }

            publish_pending(self.event_publisher.as_ref(), &mut posting, &metadata).await?;
            result.closed.push(posting.id());
        }

        if !result.closed.is_empty() || result.skipped > 0 {
            tracing::info!(
                closed = result.closed.len(),
                skipped = result.skipped,
                "Expired postings swept"
            );
        }
        Ok(result)
    }
}
