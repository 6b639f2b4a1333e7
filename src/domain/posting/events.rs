//! Posting domain events.
//!
//! Every event carries its own ID, the posting it belongs to and the moment
//! it occurred; `kind` holds the event-specific payload.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CandidateId, ContractId, DomainEvent, EventId, PostingId, SponsorId, Timestamp,
};

use super::{Compensation, PostingDetails};

/// Aggregate type reported on every posting envelope.
pub const POSTING_AGGREGATE_TYPE: &str = "JobPosting";

/// Reason recorded when the application ceiling auto-closes a posting.
pub const MAX_APPLICATIONS_REACHED: &str = "max applications reached";

/// A business-significant change to a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingEvent {
    pub event_id: EventId,
    pub posting_id: PostingId,
    pub occurred_at: Timestamp,
    pub kind: PostingEventKind,
}

/// Event-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostingEventKind {
    /// A sponsor drafted a new posting.
    Created { sponsor_id: SponsorId, title: String },

    /// Draft details were replaced.
    DetailsUpdated { details: PostingDetails },

    /// Draft compensation was replaced.
    CompensationUpdated { compensation: Compensation },

    /// The posting went live.
    Published {
        posted_at: Timestamp,
        expires_at: Timestamp,
    },

    /// A candidate applied.
    ApplicationRecorded {
        application_count: u32,
        max_applications: u32,
    },

    /// The posting stopped accepting applications.
    Closed { reason: String, closed_at: Timestamp },

    /// A candidate was hired under a contract.
    Filled {
        candidate_id: CandidateId,
        contract_id: ContractId,
    },

    /// The sponsor withdrew the posting.
    Cancelled { reason: String },
}

impl PostingEvent {
    pub(crate) fn new(posting_id: PostingId, occurred_at: Timestamp, kind: PostingEventKind) -> Self {
        Self {
            event_id: EventId::new(),
            posting_id,
            occurred_at,
            kind,
        }
    }
}

impl PostingEventKind {
    /// Routing name of this event, including its schema version.
    pub fn event_type(&self) -> &'static str {
        match self {
            PostingEventKind::Created { .. } => "job_posting.created.v1",
            PostingEventKind::DetailsUpdated { .. } => "job_posting.details_updated.v1",
            PostingEventKind::CompensationUpdated { .. } => "job_posting.compensation_updated.v1",
            PostingEventKind::Published { .. } => "job_posting.published.v1",
            PostingEventKind::ApplicationRecorded { .. } => "job_posting.application_recorded.v1",
            PostingEventKind::Closed { .. } => "job_posting.closed.v1",
            PostingEventKind::Filled { .. } => "job_posting.filled.v1",
            PostingEventKind::Cancelled { .. } => "job_posting.cancelled.v1",
        }
    }
}

impl DomainEvent for PostingEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        self.posting_id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        POSTING_AGGREGATE_TYPE
    }

    fn occurred_at(&self) -> Timestamp {
        self.occurred_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EventEnvelope;

    #[test]
    fn envelope_carries_type_aggregate_and_time() {
        let posting_id = PostingId::new();
        let event = PostingEvent::new(
            posting_id,
            Timestamp::now(),
            PostingEventKind::Closed {
                reason: "position no longer needed".to_string(),
                closed_at: Timestamp::now(),
            },
        );

        let envelope = EventEnvelope::from_event(&event).unwrap();

        assert_eq!(envelope.event_type, "job_posting.closed.v1");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.aggregate_type, "JobPosting");
        assert_eq!(envelope.aggregate_id, posting_id.to_string());
        assert_eq!(envelope.occurred_at, event.occurred_at);
        assert_eq!(envelope.payload["kind"]["type"], "closed");
        assert_eq!(envelope.payload["kind"]["reason"], "position no longer needed");
        assert!(envelope.payload["kind"]["closed_at"].is_string());
    }

    #[test]
    fn payload_deserializes_back_into_event() {
        let event = PostingEvent::new(
            PostingId::new(),
            Timestamp::now(),
            PostingEventKind::Filled {
                candidate_id: CandidateId::new(),
                contract_id: ContractId::new(),
            },
        );

        let envelope = EventEnvelope::from_event(&event).unwrap();
        let decoded: PostingEvent = envelope.payload_as().unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn every_event_type_is_versioned() {
        let kinds = [
            PostingEventKind::Closed {
                reason: String::new(),
                closed_at: Timestamp::now(),
            },
            PostingEventKind::Cancelled { reason: String::new() },
            PostingEventKind::ApplicationRecorded {
                application_count: 1,
                max_applications: 2,
            },
        ];
        for kind in kinds {
            assert!(kind.event_type().starts_with("job_posting."));
            assert!(kind.event_type().ends_with(".v1"));
        }
    }
}
