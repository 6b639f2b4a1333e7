//! In-Memory Posting Repository Adapter
//!
//! Stores postings in a map keyed by ID with an optimistic version check on
//! every write. Useful for tests and for running without a database.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PostingId, Timestamp};
use crate::domain::posting::{Posting, PostingSearchCriteria};
use crate::ports::PostingRepository;

/// In-memory storage for postings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPostingRepository {
    postings: Arc<RwLock<HashMap<PostingId, Posting>>>,
}

impl InMemoryPostingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored postings.
    pub async fn count(&self) -> usize {
        self.postings.read().await.len()
    }
}

/// Copy of `posting` as it looks once stored: next version, no pending events.
fn stored_copy(posting: &Posting) -> Posting {
    Posting::reconstitute(
        posting.id(),
        posting.sponsor_id(),
        posting.details().clone(),
        posting.compensation().cloned(),
        posting.status(),
        posting.application_count(),
        posting.max_applications(),
        posting.view_count(),
        posting.posted_at(),
        posting.expires_at(),
        posting.created_at(),
        posting.updated_at(),
        posting.version() + 1,
    )
}

fn overlaps(wanted: &BTreeSet<String>, offered: &BTreeSet<String>) -> bool {
    let offered: BTreeSet<String> = offered.iter().map(|s| s.trim().to_lowercase()).collect();
    wanted
        .iter()
        .any(|s| offered.contains(&s.trim().to_lowercase()))
}

fn nationality_compatible(preferred: Option<&str>, candidate: Option<&str>) -> bool {
    match (preferred, candidate) {
        (None, _) => true,
        (Some(p), Some(c)) => p.trim().eq_ignore_ascii_case(c.trim()),
        (Some(_), None) => false,
    }
}

#[async_trait]
impl PostingRepository for InMemoryPostingRepository {
    async fn find_by_id(&self, id: &PostingId) -> Result<Option<Posting>, DomainError> {
        let postings = self.postings.read().await;
        Ok(postings.get(id).cloned())
    }

    async fn search(&self, criteria: &PostingSearchCriteria) -> Result<Vec<Posting>, DomainError> {
        let postings = self.postings.read().await;
        let mut found: Vec<Posting> = postings
            .values()
            .filter(|p| criteria.matches(p))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        if let Some(limit) = criteria.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn save(&self, posting: &mut Posting) -> Result<(), DomainError> {
        let mut postings = self.postings.write().await;

        let stored_version = postings.get(&posting.id()).map_or(0, Posting::version);
        if stored_version != posting.version() {
            tracing::debug!(
                posting_id = %posting.id(),
                expected = posting.version(),
                actual = stored_version,
                "Stale posting version rejected"
            );
            return Err(DomainError::conflict(format!(
                "posting {} was modified concurrently (expected version {}, stored {})",
                posting.id(),
                posting.version(),
                stored_version
            ))
            .with_detail("posting_id", posting.id().to_string()));
        }

        let stored = stored_copy(posting);
        posting.mark_saved(stored.version());
        postings.insert(posting.id(), stored);
        Ok(())
    }

    async fn delete(&self, id: &PostingId) -> Result<(), DomainError> {
        let mut postings = self.postings.write().await;
        match postings.remove(id) {
            Some(_) => Ok(()),
            None => Err(
                DomainError::new(ErrorCode::PostingNotFound, format!("Posting not found: {}", id))
                    .with_detail("posting_id", id.to_string()),
            ),
        }
    }

    async fn find_matching_jobs(
        &self,
        skills: &BTreeSet<String>,
        languages: &BTreeSet<String>,
        nationality: Option<&str>,
        limit: usize,
    ) -> Result<Vec<Posting>, DomainError> {
        let postings = self.postings.read().await;
        let mut found: Vec<Posting> = postings
            .values()
            .filter(|p| p.status().is_open())
            .filter(|p| {
                let details = p.details();
                overlaps(&details.required_skills, skills)
                    || overlaps(&details.required_languages, languages)
            })
            .filter(|p| {
                nationality_compatible(p.details().preferred_nationality.as_deref(), nationality)
            })
            .cloned()
            .collect();

        found.sort_by(|a, b| b.posted_at().cmp(&a.posted_at()));
        found.truncate(limit);
        Ok(found)
    }

    async fn find_expired_open(
        &self,
        now: Timestamp,
        limit: usize,
    ) -> Result<Vec<Posting>, DomainError> {
        let postings = self.postings.read().await;
        let mut found: Vec<Posting> = postings
            .values()
            .filter(|p| p.status().is_open() && p.is_expired_at(now))
            .cloned()
            .collect();

        found.sort_by(|a, b| a.expires_at().cmp(&b.expires_at()));
        found.truncate(limit);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SponsorId;
    use crate::domain::posting::{
        AccommodationType, Compensation, Location, PaymentPeriod, PostingDetails, PostingStatus,
    };
    use rust_decimal::Decimal;

    fn tags(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn details(skills: &[&str], languages: &[&str], nationality: Option<&str>) -> PostingDetails {
        PostingDetails {
            title: "Housekeeper".to_string(),
            description: "Full-time housekeeping".to_string(),
            required_skills: tags(skills),
            required_languages: tags(languages),
            preferred_nationality: nationality.map(String::from),
            location: Location::new("Qatar", "Doha"),
            accommodation_type: Some(AccommodationType::LiveOut),
            ..Default::default()
        }
    }

    fn open_posting(details: PostingDetails) -> Posting {
        let mut posting = Posting::create(PostingId::new(), SponsorId::new(), details, 5).unwrap();
        posting
            .update_compensation(
                Compensation::new(Decimal::from(1800), "QAR", PaymentPeriod::Monthly).unwrap(),
            )
            .unwrap();
        posting.publish(30).unwrap();
        posting
    }

    #[tokio::test]
    async fn save_then_find_returns_next_version_without_events() {
        let repo = InMemoryPostingRepository::new();
        let mut posting = open_posting(details(&["cleaning"], &["English"], None));

        repo.save(&mut posting).await.unwrap();
        assert_eq!(posting.version(), 1);
        let mut loaded = repo.find_by_id(&posting.id()).await.unwrap().unwrap();

        assert_eq!(loaded.version(), 1);
        assert_eq!(loaded.status(), PostingStatus::Open);
        assert!(loaded.pull_events().is_empty());
    }

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let repo = InMemoryPostingRepository::new();
        let mut posting = open_posting(details(&["cleaning"], &["English"], None));
        repo.save(&mut posting).await.unwrap();

        let mut first = repo.find_by_id(&posting.id()).await.unwrap().unwrap();
        let mut second = first.clone();

        first.record_application().unwrap();
        repo.save(&mut first).await.unwrap();

        second.record_application().unwrap();
        let err = repo.save(&mut second).await.unwrap_err();
        assert_eq!(second.version(), 1);
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);

        let stored = repo.find_by_id(&posting.id()).await.unwrap().unwrap();
        assert_eq!(stored.application_count(), 1);
        assert_eq!(stored.version(), 2);
    }

    #[tokio::test]
    async fn same_instance_saves_again_after_next_operation() {
        let repo = InMemoryPostingRepository::new();
        let mut posting = Posting::create(
            PostingId::new(),
            SponsorId::new(),
            details(&["cleaning"], &["English"], None),
            5,
        )
        .unwrap();
        repo.save(&mut posting).await.unwrap();

        posting
            .update_compensation(
                Compensation::new(Decimal::from(1500), "QAR", PaymentPeriod::Monthly).unwrap(),
            )
            .unwrap();
        repo.save(&mut posting).await.unwrap();
        posting.publish(30).unwrap();
        repo.save(&mut posting).await.unwrap();

        assert_eq!(posting.version(), 3);
        let stored = repo.find_by_id(&posting.id()).await.unwrap().unwrap();
        assert_eq!(stored.version(), 3);
        assert!(stored.compensation().is_some());
        assert_eq!(stored.status(), PostingStatus::Open);
        // Events stay on the instance until the caller drains them.
        assert_eq!(posting.pull_events().len(), 3);
    }

    #[tokio::test]
    async fn unsaved_copy_of_stored_posting_is_stale() {
        let repo = InMemoryPostingRepository::new();
        let mut posting = open_posting(details(&["cleaning"], &["English"], None));
        let mut copy = posting.clone();
        repo.save(&mut posting).await.unwrap();

        // The copy still carries version 0.
        let err = repo.save(&mut copy).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    }

    #[tokio::test]
    async fn delete_missing_posting_is_not_found() {
        let repo = InMemoryPostingRepository::new();
        let err = repo.delete(&PostingId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PostingNotFound);
    }

    #[tokio::test]
    async fn search_applies_criteria_and_limit() {
        let repo = InMemoryPostingRepository::new();
        let mut a = open_posting(details(&["cleaning"], &["English"], None));
        let mut b = open_posting(details(&["cooking"], &["Arabic"], None));
        let mut draft =
            Posting::create(PostingId::new(), SponsorId::new(), PostingDetails::default(), 3)
                .unwrap();
        for p in [&mut a, &mut b, &mut draft] {
            repo.save(p).await.unwrap();
        }

        let open = repo
            .search(&PostingSearchCriteria::default().with_status(PostingStatus::Open))
            .await
            .unwrap();
        assert_eq!(open.len(), 2);

        let limited = repo
            .search(&PostingSearchCriteria::default().with_limit(1))
            .await
            .unwrap();
        assert_eq!(limited.len(), 1);

        let mine = repo
            .search(&PostingSearchCriteria::for_sponsor(a.sponsor_id()))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id(), a.id());
    }

    #[tokio::test]
    async fn matching_prefilter_needs_overlap_and_compatible_nationality() {
        let repo = InMemoryPostingRepository::new();
        let mut cooking = open_posting(details(&["cooking"], &["Tagalog"], None));
        let mut filipino_only =
            open_posting(details(&["cleaning"], &["English"], Some("Filipino")));
        let mut unrelated = open_posting(details(&["driving"], &["Hindi"], None));
        for p in [&mut cooking, &mut filipino_only, &mut unrelated] {
            repo.save(p).await.unwrap();
        }

        let found = repo
            .find_matching_jobs(&tags(&["Cooking"]), &tags(&["english"]), Some("Kenyan"), 10)
            .await
            .unwrap();
        let ids: Vec<PostingId> = found.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![cooking.id()]);

        let found = repo
            .find_matching_jobs(&tags(&[]), &tags(&["English"]), Some("filipino"), 10)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), filipino_only.id());
    }

    #[tokio::test]
    async fn expired_sweep_only_returns_open_postings_past_expiry() {
        let repo = InMemoryPostingRepository::new();
        let now = Timestamp::now();

        let mut expired = open_posting(details(&["cleaning"], &["English"], None));
        let mut closed = open_posting(details(&["cleaning"], &["English"], None));
        closed.close("done").unwrap();
        repo.save(&mut expired).await.unwrap();
        repo.save(&mut closed).await.unwrap();

        assert!(repo.find_expired_open(now, 10).await.unwrap().is_empty());

        let later = now.plus_days(31);
        let found = repo.find_expired_open(later, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), expired.id());
    }
}
