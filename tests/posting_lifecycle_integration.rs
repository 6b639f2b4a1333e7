//! Integration tests for the posting lifecycle.
//!
//! These tests drive the command handlers end to end:
//! 1. Sponsor creates, edits and publishes a posting
//! 2. Candidates apply concurrently until the ceiling closes it
//! 3. The expiry reaper closes postings whose window has passed
//! 4. Candidates are matched against open postings
//!
//! Uses the in-memory adapters so no external services are needed.

use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;

use hireflow::adapters::{InMemoryEventBus, InMemoryPostingRepository};
use hireflow::application::handlers::{
    CancelPostingCommand, CreatePostingCommand, FindMatchingJobsQuery, MarkPostingFilledCommand,
    PublishPostingCommand, RecordApplicationCommand, UpdateCompensationCommand, EXPIRY_REASON,
};
use hireflow::application::PostingAppState;
use hireflow::config::PostingConfig;
use hireflow::domain::foundation::{
    CandidateId, CommandMetadata, ContractId, Percentage, PostingId, SponsorId, UserId,
};
use hireflow::domain::matching::{CandidateProjection, WorkExperience};
use hireflow::domain::posting::{
    AccommodationType, Compensation, Location, PaymentPeriod, Posting, PostingDetails,
    PostingError, PostingEvent, PostingEventKind, PostingStatus,
};
use hireflow::ports::PostingRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    repository: Arc<InMemoryPostingRepository>,
    bus: Arc<InMemoryEventBus>,
    state: PostingAppState,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(PostingConfig::default())
    }

    fn with_config(config: PostingConfig) -> Self {
        let repository = Arc::new(InMemoryPostingRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let state = PostingAppState::new(repository.clone(), bus.clone(), config);
        Self {
            repository,
            bus,
            state,
        }
    }

    /// Creates and publishes a complete posting with the given ceiling.
    async fn open_posting(&self, sponsor_id: SponsorId, max_applications: u32) -> Posting {
        let draft = self
            .state
            .create_posting_handler()
            .handle(
                CreatePostingCommand {
                    sponsor_id,
                    details: caregiver_details(),
                    compensation: Some(monthly_salary(450)),
                    max_applications: Some(max_applications),
                },
                metadata(),
            )
            .await
            .unwrap();

        self.state
            .publish_posting_handler()
            .handle(
                PublishPostingCommand {
                    posting_id: draft.id(),
                    sponsor_id,
                    expiry_days: None,
                },
                metadata(),
            )
            .await
            .unwrap()
    }

    async fn reload(&self, id: PostingId) -> Posting {
        self.repository.find_by_id(&id).await.unwrap().unwrap()
    }

    fn event_types_for(&self, id: PostingId) -> Vec<String> {
        self.bus
            .events_for_aggregate(&id.to_string())
            .into_iter()
            .map(|e| e.event_type)
            .collect()
    }
}

fn tags(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn caregiver_details() -> PostingDetails {
    PostingDetails {
        title: "Live-in Caregiver".to_string(),
        description: "Care for an elderly parent, light cooking".to_string(),
        required_skills: tags(&["elderly care", "cooking"]),
        required_languages: tags(&["English", "Arabic"]),
        min_experience_years: 2,
        location: Location::new("Kuwait", "Kuwait City"),
        accommodation_type: Some(AccommodationType::LiveIn),
        ..Default::default()
    }
}

fn monthly_salary(amount: i64) -> Compensation {
    Compensation::new(Decimal::from(amount), "KWD", PaymentPeriod::Monthly).unwrap()
}

fn metadata() -> CommandMetadata {
    CommandMetadata::new(UserId::new("sponsor-user-7").unwrap())
        .with_correlation_id("integration-correlation")
}

fn application(posting_id: PostingId) -> RecordApplicationCommand {
    RecordApplicationCommand {
        posting_id,
        candidate_id: CandidateId::new(),
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn draft_to_filled_through_handlers() {
    let h = Harness::new();
    let sponsor = SponsorId::new();

    let draft = h
        .state
        .create_posting_handler()
        .handle(
            CreatePostingCommand {
                sponsor_id: sponsor,
                details: caregiver_details(),
                compensation: None,
                max_applications: None,
            },
            metadata(),
        )
        .await
        .unwrap();
    assert_eq!(draft.status(), PostingStatus::Draft);
    assert_eq!(draft.max_applications(), 50);

    // Compensation is a publish precondition.
    let early = h
        .state
        .publish_posting_handler()
        .handle(
            PublishPostingCommand {
                posting_id: draft.id(),
                sponsor_id: sponsor,
                expiry_days: None,
            },
            metadata(),
        )
        .await;
    assert!(matches!(
        early,
        Err(PostingError::PublishPreconditionFailed { ref missing }) if missing == &vec!["compensation".to_string()]
    ));

    h.state
        .update_compensation_handler()
        .handle(
            UpdateCompensationCommand {
                posting_id: draft.id(),
                sponsor_id: sponsor,
                compensation: monthly_salary(500),
            },
            metadata(),
        )
        .await
        .unwrap();

    let open = h
        .state
        .publish_posting_handler()
        .handle(
            PublishPostingCommand {
                posting_id: draft.id(),
                sponsor_id: sponsor,
                expiry_days: Some(14),
            },
            metadata(),
        )
        .await
        .unwrap();
    assert_eq!(open.status(), PostingStatus::Open);
    let posted_at = open.posted_at().unwrap();
    assert_eq!(open.expires_at(), Some(posted_at.plus_days(14)));

    h.state
        .record_application_handler()
        .handle(application(open.id()), metadata())
        .await
        .unwrap();

    let filled = h
        .state
        .mark_filled_handler()
        .handle(
            MarkPostingFilledCommand {
                posting_id: open.id(),
                sponsor_id: sponsor,
                candidate_id: CandidateId::new(),
                contract_id: ContractId::new(),
            },
            metadata(),
        )
        .await
        .unwrap();
    assert_eq!(filled.status(), PostingStatus::Filled);

    let cancel = h
        .state
        .cancel_posting_handler()
        .handle(
            CancelPostingCommand {
                posting_id: open.id(),
                sponsor_id: sponsor,
                reason: "changed plans".to_string(),
            },
            metadata(),
        )
        .await;
    assert_eq!(cancel.unwrap_err(), PostingError::CannotCancelFilled);

    assert_eq!(
        h.event_types_for(open.id()),
        vec![
            "job_posting.created.v1",
            "job_posting.compensation_updated.v1",
            "job_posting.published.v1",
            "job_posting.application_recorded.v1",
            "job_posting.filled.v1",
        ]
    );

    for envelope in h.bus.published_events() {
        assert_eq!(
            envelope.metadata.correlation_id.as_deref(),
            Some("integration-correlation")
        );
    }
}

#[tokio::test]
async fn other_sponsor_cannot_modify_posting() {
    let h = Harness::new();
    let open = h.open_posting(SponsorId::new(), 5).await;

    let result = h
        .state
        .cancel_posting_handler()
        .handle(
            CancelPostingCommand {
                posting_id: open.id(),
                sponsor_id: SponsorId::new(),
                reason: "not mine".to_string(),
            },
            metadata(),
        )
        .await;

    assert_eq!(result.unwrap_err(), PostingError::Forbidden);
    assert_eq!(h.reload(open.id()).await.status(), PostingStatus::Open);
}

// =============================================================================
// Application ceiling under contention
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_applications_never_exceed_ceiling() {
    // Each conflict means another save won, so 10 attempts always suffice
    // for a ceiling of 5.
    let h = Harness::with_config(PostingConfig {
        application_retry_attempts: 10,
        ..Default::default()
    });
    let open = h.open_posting(SponsorId::new(), 5).await;
    h.bus.clear();

    let handler = Arc::new(h.state.record_application_handler());
    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let handler = handler.clone();
            let posting_id = open.id();
            tokio::spawn(async move { handler.handle(application(posting_id), metadata()).await })
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(PostingError::NotAcceptingApplications(PostingStatus::Closed)) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(accepted, 5);
    assert_eq!(rejected, 15);

    let stored = h.reload(open.id()).await;
    assert_eq!(stored.application_count(), 5);
    assert_eq!(stored.status(), PostingStatus::Closed);
    assert_eq!(h.bus.events_of_type("job_posting.application_recorded.v1").len(), 5);
    assert_eq!(h.bus.events_of_type("job_posting.closed.v1").len(), 1);
}

// =============================================================================
// Expiry
// =============================================================================

#[tokio::test]
async fn reaper_closes_expired_postings_only() {
    let h = Harness::new();
    let open = h.open_posting(SponsorId::new(), 5).await;
    let expires_at = open.expires_at().unwrap();
    h.bus.clear();

    let reaper = h.state.expiry_reaper();

    let before = reaper.sweep_at(expires_at.minus_days(1)).await.unwrap();
    assert!(before.closed.is_empty());
    assert!(!h.reload(open.id()).await.is_expired_at(expires_at.minus_days(1)));

    let after = reaper.sweep_at(expires_at.plus_days(1)).await.unwrap();
    assert_eq!(after.closed, vec![open.id()]);

    let stored = h.reload(open.id()).await;
    assert_eq!(stored.status(), PostingStatus::Closed);

    let event: PostingEvent = h.bus.published_events()[0].payload_as().unwrap();
    assert_eq!(
        event.kind,
        PostingEventKind::Closed {
            reason: EXPIRY_REASON.to_string(),
            closed_at: event.occurred_at,
        }
    );

    // A closed posting no longer takes applications.
    let late = h
        .state
        .record_application_handler()
        .handle(application(open.id()), metadata())
        .await;
    assert_eq!(
        late.unwrap_err(),
        PostingError::NotAcceptingApplications(PostingStatus::Closed)
    );
}

// =============================================================================
// Matching
// =============================================================================

#[tokio::test]
async fn candidate_matches_open_postings_with_scores() {
    let h = Harness::new();
    let open = h.open_posting(SponsorId::new(), 5).await;
    let closed = h.open_posting(SponsorId::new(), 1).await;
    h.state
        .record_application_handler()
        .handle(application(closed.id()), metadata())
        .await
        .unwrap();

    let candidate = CandidateProjection {
        skills: tags(&["Elderly Care", "cooking"]),
        languages: tags(&["english", "arabic"]),
        work_experience: vec![WorkExperience::months(18), WorkExperience::months(6)],
        nationality: Some("Filipino".to_string()),
        profile_completeness: Percentage::new(100),
    };

    let matches = h
        .state
        .find_matching_jobs_handler()
        .handle(FindMatchingJobsQuery {
            candidate,
            limit: 10,
        })
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].posting.id(), open.id());
    assert_eq!(matches[0].score, 100);
}
