//! Posting command and query handlers.
//!
//! Command handlers follow one flow: load the posting, authorize the
//! sponsor where the operation is sponsor-owned, run one lifecycle
//! operation, save, then publish the drained events stamped with the
//! command metadata.

mod cancel_posting;
mod close_expired_postings;
mod close_posting;
mod create_posting;
mod find_matching_jobs;
mod mark_posting_filled;
mod publish_posting;
mod record_application;
mod record_view;
mod update_compensation;
mod update_posting_details;

pub use cancel_posting::{CancelPostingCommand, CancelPostingHandler};
pub use close_expired_postings::{
    CloseExpiredPostingsCommand, CloseExpiredPostingsHandler, CloseExpiredPostingsResult,
    EXPIRY_REASON,
};
pub use close_posting::{ClosePostingCommand, ClosePostingHandler};
pub use create_posting::{CreatePostingCommand, CreatePostingHandler};
pub use find_matching_jobs::{FindMatchingJobsHandler, FindMatchingJobsQuery, JobMatch};
pub use mark_posting_filled::{MarkPostingFilledCommand, MarkPostingFilledHandler};
pub use publish_posting::{PublishPostingCommand, PublishPostingHandler};
pub use record_application::{
    RecordApplicationCommand, RecordApplicationHandler, RecordApplicationResult,
};
pub use record_view::{RecordViewCommand, RecordViewHandler};
pub use update_compensation::{UpdateCompensationCommand, UpdateCompensationHandler};
pub use update_posting_details::{UpdatePostingDetailsCommand, UpdatePostingDetailsHandler};

use crate::domain::foundation::{CommandMetadata, EventEnvelope, PostingId};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::{EventPublisher, PostingRepository};

/// Loads a posting or fails with `NotFound`.
pub(crate) async fn load_posting(
    repository: &dyn PostingRepository,
    id: PostingId,
) -> Result<Posting, PostingError> {
    repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| PostingError::not_found(id))
}

/// Drains the posting's events and publishes them in order.
///
/// Returns how many events were published.
pub(crate) async fn publish_pending(
    publisher: &dyn EventPublisher,
    posting: &mut Posting,
    metadata: &CommandMetadata,
) -> Result<usize, PostingError> {
    let envelopes = posting
        .pull_events()
        .iter()
        .map(EventEnvelope::from_event)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PostingError::infrastructure(format!("Failed to serialize event: {}", e)))?;

    let count = envelopes.len();
    if count > 0 {
        publisher.publish_all(metadata.stamp_all(envelopes)).await?;
    }
    Ok(count)
}
