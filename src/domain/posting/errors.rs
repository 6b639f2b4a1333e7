//! Posting-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, PostingId, ValidationError};

use super::PostingStatus;

/// Posting-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingError {
    /// Details or compensation edited outside draft.
    EditNotPermitted(PostingStatus),
    /// Publish attempted with required fields missing.
    PublishPreconditionFailed { missing: Vec<String> },
    /// Publish attempted from a status other than draft.
    InvalidPublishTransition(PostingStatus),
    /// Application recorded while the posting is not open.
    NotAcceptingApplications(PostingStatus),
    /// Application count already at the ceiling.
    ApplicationCeilingReached { max_applications: u32 },
    /// Close attempted on a filled posting, or a closed one.
    AlreadyTerminal(PostingStatus),
    /// Fill attempted from a status other than open.
    InvalidFillTransition(PostingStatus),
    /// Cancel attempted on a filled posting.
    CannotCancelFilled,
    /// Cancel attempted on an already cancelled posting.
    AlreadyCancelled,
    /// Posting was not found.
    NotFound(PostingId),
    /// Caller is not the owning sponsor.
    Forbidden,
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// Stored version moved on since the posting was loaded.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl PostingError {
    pub fn edit_not_permitted(status: PostingStatus) -> Self {
        PostingError::EditNotPermitted(status)
    }
    pub fn publish_precondition_failed(missing: Vec<String>) -> Self {
        PostingError::PublishPreconditionFailed { missing }
    }
    pub fn invalid_publish_transition(status: PostingStatus) -> Self {
        PostingError::InvalidPublishTransition(status)
    }
    pub fn not_accepting_applications(status: PostingStatus) -> Self {
        PostingError::NotAcceptingApplications(status)
    }
    pub fn ceiling_reached(max_applications: u32) -> Self {
        PostingError::ApplicationCeilingReached { max_applications }
    }
    pub fn already_terminal(status: PostingStatus) -> Self {
        PostingError::AlreadyTerminal(status)
    }
    pub fn invalid_fill_transition(status: PostingStatus) -> Self {
        PostingError::InvalidFillTransition(status)
    }
    pub fn not_found(id: PostingId) -> Self {
        PostingError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        PostingError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PostingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        PostingError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PostingError::Infrastructure(message.into())
    }

    /// True for optimistic-concurrency conflicts, which callers may retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, PostingError::Conflict(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PostingError::EditNotPermitted(_) => ErrorCode::EditNotPermitted,
            PostingError::PublishPreconditionFailed { .. } => ErrorCode::PublishPreconditionFailed,
            PostingError::InvalidPublishTransition(_) => ErrorCode::InvalidStateTransition,
            PostingError::NotAcceptingApplications(_) => ErrorCode::NotAcceptingApplications,
            PostingError::ApplicationCeilingReached { .. } => ErrorCode::ApplicationCeilingReached,
            PostingError::AlreadyTerminal(_) => ErrorCode::AlreadyTerminal,
            PostingError::InvalidFillTransition(_) => ErrorCode::InvalidStateTransition,
            PostingError::CannotCancelFilled => ErrorCode::CannotCancelFilled,
            PostingError::AlreadyCancelled => ErrorCode::InvalidStateTransition,
            PostingError::NotFound(_) => ErrorCode::PostingNotFound,
            PostingError::Forbidden => ErrorCode::Forbidden,
            PostingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PostingError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            PostingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PostingError::EditNotPermitted(status) => {
                format!("Posting can only be edited in draft, current status is {}", status)
            }
            PostingError::PublishPreconditionFailed { missing } => {
                format!("Posting is missing required fields: {}", missing.join(", "))
            }
            PostingError::InvalidPublishTransition(status) => {
                format!("Only draft postings can be published, current status is {}", status)
            }
            PostingError::NotAcceptingApplications(status) => {
                format!("Posting is not accepting applications, current status is {}", status)
            }
            PostingError::ApplicationCeilingReached { max_applications } => {
                format!("Posting already has {} applications", max_applications)
            }
            PostingError::AlreadyTerminal(status) => {
                format!("Posting is already {}", status)
            }
            PostingError::InvalidFillTransition(status) => {
                format!("Only open postings can be filled, current status is {}", status)
            }
            PostingError::CannotCancelFilled => "Cannot cancel a filled posting".to_string(),
            PostingError::AlreadyCancelled => "Posting is already cancelled".to_string(),
            PostingError::NotFound(id) => format!("Posting not found: {}", id),
            PostingError::Forbidden => "Permission denied".to_string(),
            PostingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PostingError::Conflict(msg) => format!("Concurrent modification: {}", msg),
            PostingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PostingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PostingError {}

impl From<ValidationError> for PostingError {
    fn from(err: ValidationError) -> Self {
        PostingError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for PostingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrencyConflict => PostingError::Conflict(err.message),
            ErrorCode::Forbidden => PostingError::Forbidden,
            ErrorCode::PostingNotFound => match err
                .details
                .get("posting_id")
                .and_then(|id| id.parse::<PostingId>().ok())
            {
                Some(id) => PostingError::NotFound(id),
                None => PostingError::Infrastructure(err.to_string()),
            },
            ErrorCode::ValidationFailed => PostingError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => PostingError::Infrastructure(err.to_string()),
        }
    }
}
