//! Posting repository port.
//!
//! Defines the contract for persisting and retrieving Posting aggregates.
//!
//! # Concurrency
//!
//! Two callers may load the same posting, both see `application_count <
//! max_applications`, and both record an application. Implementations must
//! serialize writes per posting identity with an optimistic version check:
//!
//! - `save` compares `posting.version()` with the stored version and fails
//!   with `ConcurrencyConflict` if they differ
//! - on success the stored version becomes `posting.version() + 1` and the
//!   caller's instance is advanced to it, so the same instance can be saved
//!   again after its next lifecycle operation
//! - a posting that has never been stored must carry version 0
//!
//! Callers that hit a conflict reload and retry the whole operation.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PostingId, Timestamp};
use crate::domain::posting::{Posting, PostingSearchCriteria};

/// Repository port for Posting aggregate persistence.
#[async_trait]
pub trait PostingRepository: Send + Sync {
    /// Find a posting by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PostingId) -> Result<Option<Posting>, DomainError>;

    /// Find postings satisfying every filter in `criteria`.
    ///
    /// Returns postings ordered by `created_at` descending, truncated to
    /// `criteria.limit` when set.
    async fn search(&self, criteria: &PostingSearchCriteria) -> Result<Vec<Posting>, DomainError>;

    /// Insert or update a posting, persisting every mutable field.
    ///
    /// On success `posting.version()` is the newly stored version. Pending
    /// domain events are left on the instance.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the stored version differs from `posting.version()`
    /// - `DatabaseError` on persistence failure
    async fn save(&self, posting: &mut Posting) -> Result<(), DomainError>;

    /// Remove a posting.
    ///
    /// # Errors
    ///
    /// - `PostingNotFound` if the posting doesn't exist
    async fn delete(&self, id: &PostingId) -> Result<(), DomainError>;

    /// Coarse pre-filter for candidate matching.
    ///
    /// Returns open postings sharing at least one skill or language with the
    /// candidate whose nationality preference is absent or equal to
    /// `nationality`. Fine-grained scoring happens afterwards.
    async fn find_matching_jobs(
        &self,
        skills: &BTreeSet<String>,
        languages: &BTreeSet<String>,
        nationality: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Posting>, DomainError>;

    /// Open postings whose expiry is before `now`, oldest expiry first.
    async fn find_expired_open(
        &self,
        now: Timestamp,
        limit: usize,
    ) -> Result<Vec<Posting>, DomainError>;
}
