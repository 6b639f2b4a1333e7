//! RecordViewHandler - Command handler for counting posting views.

use std::sync::Arc;

use crate::domain::foundation::PostingId;
use crate::domain::posting::{Posting, PostingError};
use crate::ports::PostingRepository;

use super::load_posting;

/// Command to count one view of a posting.
#[derive(Debug, Clone)]
pub struct RecordViewCommand {
    pub posting_id: PostingId,
}

/// Handler for view counting. Views record no events, so nothing is published.
pub struct RecordViewHandler {
    repository: Arc<dyn PostingRepository>,
}

impl RecordViewHandler {
    pub fn new(repository: Arc<dyn PostingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RecordViewCommand) -> Result<Posting, PostingError> {
        let mut posting = load_posting(self.repository.as_ref(), cmd.posting_id).await?;
        posting.record_view();
        self.repository.save(&mut posting).await?;

        tracing::trace!(
            posting_id = %posting.id(),
            view_count = posting.view_count(),
            "Posting viewed"
        );
        Ok(posting)
    }
}
