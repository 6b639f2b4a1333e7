//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and event infrastructure
//! that form the vocabulary of the placement domain.

mod command;
mod errors;
mod events;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{CandidateId, ContractId, PostingId, SponsorId, UserId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
