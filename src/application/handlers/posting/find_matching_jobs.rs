//! FindMatchingJobsHandler - Query handler scoring open postings for a candidate.

use std::sync::Arc;

use crate::domain::matching::{CandidateProjection, MatchBreakdown};
use crate::domain::posting::{Posting, PostingError};
use crate::ports::PostingRepository;

/// Query for postings a candidate may fit.
#[derive(Debug, Clone)]
pub struct FindMatchingJobsQuery {
    pub candidate: CandidateProjection,
    pub limit: usize,
}

/// One posting with its score against the candidate.
#[derive(Debug, Clone)]
pub struct JobMatch {
    pub posting: Posting,
    pub score: u8,
    pub breakdown: MatchBreakdown,
}

/// Handler for candidate-side job matching.
///
/// The repository does the coarse pre-filter; each result is then scored.
/// Results keep the repository's order.
pub struct FindMatchingJobsHandler {
    repository: Arc<dyn PostingRepository>,
}

impl FindMatchingJobsHandler {
    pub fn new(repository: Arc<dyn PostingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: FindMatchingJobsQuery) -> Result<Vec<JobMatch>, PostingError> {
        let candidate = &query.candidate;
        let postings = self
            .repository
            .find_matching_jobs(
                &candidate.skills,
                &candidate.languages,
                candidate.nationality.as_deref(),
                query.limit,
            )
            .await?;

        let matches: Vec<JobMatch> = postings
            .into_iter()
            .map(|posting| {
                let breakdown = MatchBreakdown::compute(&posting, candidate);
                JobMatch {
                    score: breakdown.score(),
                    breakdown,
                    posting,
                }
            })
            .collect();

        tracing::debug!(matches = matches.len(), limit = query.limit, "Matching jobs found");
        Ok(matches)
    }
}
