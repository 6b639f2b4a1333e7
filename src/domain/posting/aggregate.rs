//! Posting aggregate entity.
//!
//! A posting is one job opening owned by a sponsor. It starts as a draft,
//! is published once complete, takes applications up to a ceiling and ends
//! closed, filled or cancelled.
//!
//! Every lifecycle operation appends its domain events to an internal queue;
//! the application layer drains it with [`Posting::pull_events`] after saving.

use crate::domain::foundation::{
    CandidateId, ContractId, PostingId, SponsorId, StateMachine, Timestamp, ValidationError,
};

use super::events::MAX_APPLICATIONS_REACHED;
use super::{
    Compensation, PostingDetails, PostingError, PostingEvent, PostingEventKind, PostingStatus,
};

/// Longest publication window accepted by `publish`.
pub const MAX_EXPIRY_DAYS: u32 = 3650;

/// Job posting aggregate.
///
/// # Invariants
///
/// - `application_count <= max_applications`
/// - `max_applications >= 1`
/// - `status` only moves along edges allowed by [`PostingStatus`]
#[derive(Debug, Clone)]
pub struct Posting {
    id: PostingId,
    sponsor_id: SponsorId,
    details: PostingDetails,
    compensation: Option<Compensation>,
    status: PostingStatus,
    application_count: u32,
    max_applications: u32,
    view_count: u64,
    posted_at: Option<Timestamp>,
    expires_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,

    /// Version last read from or written to storage.
    version: u64,

    /// Pending events, in emission order.
    domain_events: Vec<PostingEvent>,
}

impl Posting {
    /// Creates a new draft posting and records `created`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `max_applications` is zero
    pub fn create(
        id: PostingId,
        sponsor_id: SponsorId,
        details: PostingDetails,
        max_applications: u32,
    ) -> Result<Self, PostingError> {
        if max_applications == 0 {
            return Err(ValidationError::out_of_range(
                "max_applications",
                1,
                i32::MAX,
                0,
            )
            .into());
        }

        let details = details.normalized();
        let now = Timestamp::now();
        let mut posting = Self {
            id,
            sponsor_id,
            details,
            compensation: None,
            status: PostingStatus::Draft,
            application_count: 0,
            max_applications,
            view_count: 0,
            posted_at: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
            version: 0,
            domain_events: Vec::new(),
        };

        posting.record_event(
            now,
            PostingEventKind::Created {
                sponsor_id,
                title: posting.details.title.clone(),
            },
        );

        Ok(posting)
    }

    /// Rebuilds a posting from storage. No validation, no events.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: PostingId,
        sponsor_id: SponsorId,
        details: PostingDetails,
        compensation: Option<Compensation>,
        status: PostingStatus,
        application_count: u32,
        max_applications: u32,
        view_count: u64,
        posted_at: Option<Timestamp>,
        expires_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            sponsor_id,
            details,
            compensation,
            status,
            application_count,
            max_applications,
            view_count,
            posted_at,
            expires_at,
            created_at,
            updated_at,
            version,
            domain_events: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> PostingId {
        self.id
    }

    pub fn sponsor_id(&self) -> SponsorId {
        self.sponsor_id
    }

    pub fn details(&self) -> &PostingDetails {
        &self.details
    }

    pub fn title(&self) -> &str {
        &self.details.title
    }

    pub fn compensation(&self) -> Option<&Compensation> {
        self.compensation.as_ref()
    }

    pub fn status(&self) -> PostingStatus {
        self.status
    }

    pub fn application_count(&self) -> u32 {
        self.application_count
    }

    pub fn max_applications(&self) -> u32 {
        self.max_applications
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn posted_at(&self) -> Option<Timestamp> {
        self.posted_at
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Storage version this instance was loaded at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Records the version a repository just stored this instance at.
    pub(crate) fn mark_saved(&mut self, version: u64) {
        self.version = version;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks that `sponsor_id` owns this posting.
    pub fn authorize(&self, sponsor_id: &SponsorId) -> Result<(), PostingError> {
        if &self.sponsor_id == sponsor_id {
            Ok(())
        } else {
            Err(PostingError::forbidden())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Draft editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the descriptive attributes.
    ///
    /// # Errors
    ///
    /// - `EditNotPermitted` unless the posting is a draft
    pub fn update_details(&mut self, details: PostingDetails) -> Result<(), PostingError> {
        self.ensure_editable()?;

        let now = Timestamp::now();
        self.details = details.normalized();
        self.updated_at = now;
        self.record_event(
            now,
            PostingEventKind::DetailsUpdated {
                details: self.details.clone(),
            },
        );
        Ok(())
    }

    /// Replaces the compensation offer.
    ///
    /// # Errors
    ///
    /// - `EditNotPermitted` unless the posting is a draft
    pub fn update_compensation(&mut self, compensation: Compensation) -> Result<(), PostingError> {
        self.ensure_editable()?;

        let now = Timestamp::now();
        self.compensation = Some(compensation.clone());
        self.updated_at = now;
        self.record_event(now, PostingEventKind::CompensationUpdated { compensation });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Publication
    // ─────────────────────────────────────────────────────────────────────────

    /// Names of the fields that still block publication, empty when complete.
    pub fn missing_fields(&self) -> Vec<String> {
        let d = &self.details;
        let checks: [(&str, bool); 7] = [
            ("title", !d.title.trim().is_empty()),
            ("description", !d.description.trim().is_empty()),
            ("required_skills", !d.required_skills.is_empty()),
            ("required_languages", !d.required_languages.is_empty()),
            ("location", d.location.is_fully_specified()),
            ("compensation", self.compensation.is_some()),
            ("accommodation_type", d.accommodation_type.is_some()),
        ];

        checks
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// True when every field required for publication is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Publishes a complete draft for `expiry_days` days.
    ///
    /// # Errors
    ///
    /// - `InvalidPublishTransition` unless the posting is a draft
    /// - `ValidationFailed` if `expiry_days` is zero or above [`MAX_EXPIRY_DAYS`]
    /// - `PublishPreconditionFailed` if required fields are missing
    pub fn publish(&mut self, expiry_days: u32) -> Result<(), PostingError> {
        if !self.status.is_draft() {
            return Err(PostingError::invalid_publish_transition(self.status));
        }
        if expiry_days == 0 || expiry_days > MAX_EXPIRY_DAYS {
            return Err(ValidationError::out_of_range(
                "expiry_days",
                1,
                MAX_EXPIRY_DAYS as i32,
                i32::try_from(expiry_days).unwrap_or(i32::MAX),
            )
            .into());
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(PostingError::publish_precondition_failed(missing));
        }

        self.status = self
            .status
            .transition_to(PostingStatus::Open)
            .map_err(|_| PostingError::invalid_publish_transition(self.status))?;

        let now = Timestamp::now();
        let expires_at = now.plus_days(i64::from(expiry_days));
        self.posted_at = Some(now);
        self.expires_at = Some(expires_at);
        self.updated_at = now;
        self.record_event(
            now,
            PostingEventKind::Published {
                posted_at: now,
                expires_at,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Intake
    // ─────────────────────────────────────────────────────────────────────────

    /// Counts one application. Reaching the ceiling closes the posting in the
    /// same call, recording `application_recorded` followed by `closed`.
    ///
    /// # Errors
    ///
    /// - `NotAcceptingApplications` unless the posting is open
    /// - `ApplicationCeilingReached` if the count is already at the ceiling
    pub fn record_application(&mut self) -> Result<(), PostingError> {
        if !self.status.is_open() {
            return Err(PostingError::not_accepting_applications(self.status));
        }
        if self.application_count >= self.max_applications {
            return Err(PostingError::ceiling_reached(self.max_applications));
        }

        let now = Timestamp::now();
        self.application_count += 1;
        self.updated_at = now;
        self.record_event(
            now,
            PostingEventKind::ApplicationRecorded {
                application_count: self.application_count,
                max_applications: self.max_applications,
            },
        );

        if self.application_count == self.max_applications {
            self.status = self
                .status
                .transition_to(PostingStatus::Closed)
                .map_err(|_| PostingError::already_terminal(self.status))?;
            self.record_event(
                now,
                PostingEventKind::Closed {
                    reason: MAX_APPLICATIONS_REACHED.to_string(),
                    closed_at: now,
                },
            );
        }
        Ok(())
    }

    /// Counts one view. Allowed in every status; records no event.
    pub fn record_view(&mut self) {
        self.view_count = self.view_count.saturating_add(1);
        self.updated_at = Timestamp::now();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Termination
    // ─────────────────────────────────────────────────────────────────────────

    /// Stops the posting from accepting applications.
    ///
    /// # Errors
    ///
    /// - `AlreadyTerminal` if the posting is already closed or filled
    pub fn close(&mut self, reason: impl Into<String>) -> Result<(), PostingError> {
        self.status = self
            .status
            .transition_to(PostingStatus::Closed)
            .map_err(|_| PostingError::already_terminal(self.status))?;

        let now = Timestamp::now();
        self.updated_at = now;
        self.record_event(
            now,
            PostingEventKind::Closed {
                reason: reason.into(),
                closed_at: now,
            },
        );
        Ok(())
    }

    /// Records the hire that fills this posting.
    ///
    /// # Errors
    ///
    /// - `InvalidFillTransition` unless the posting is open
    pub fn mark_as_filled(
        &mut self,
        candidate_id: CandidateId,
        contract_id: ContractId,
    ) -> Result<(), PostingError> {
        self.status = self
            .status
            .transition_to(PostingStatus::Filled)
            .map_err(|_| PostingError::invalid_fill_transition(self.status))?;

        let now = Timestamp::now();
        self.updated_at = now;
        self.record_event(
            now,
            PostingEventKind::Filled {
                candidate_id,
                contract_id,
            },
        );
        Ok(())
    }

    /// Withdraws the posting.
    ///
    /// # Errors
    ///
    /// - `CannotCancelFilled` if the posting is filled
    /// - `AlreadyCancelled` if the posting is already cancelled
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), PostingError> {
        match self.status {
            PostingStatus::Filled => return Err(PostingError::CannotCancelFilled),
            PostingStatus::Cancelled => return Err(PostingError::AlreadyCancelled),
            _ => {}
        }

        self.status = self
            .status
            .transition_to(PostingStatus::Cancelled)
            .map_err(|_| PostingError::CannotCancelFilled)?;

        let now = Timestamp::now();
        self.updated_at = now;
        self.record_event(
            now,
            PostingEventKind::Cancelled {
                reason: reason.into(),
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Expiry
    // ─────────────────────────────────────────────────────────────────────────

    /// True if the posting has an expiry in the past.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }

    /// True if the posting has an expiry before `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| at.is_before(&now))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns all pending events and empties the queue.
    pub fn pull_events(&mut self) -> Vec<PostingEvent> {
        std::mem::take(&mut self.domain_events)
    }

    fn record_event(&mut self, occurred_at: Timestamp, kind: PostingEventKind) {
        self.domain_events
            .push(PostingEvent::new(self.id, occurred_at, kind));
    }

    fn ensure_editable(&self) -> Result<(), PostingError> {
        if self.status.can_edit() {
            Ok(())
        } else {
            Err(PostingError::edit_not_permitted(self.status))
        }
    }
}
