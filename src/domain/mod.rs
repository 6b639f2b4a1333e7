//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `posting` - Job posting aggregate, lifecycle and search criteria
//! - `matching` - Candidate projection and match scoring

pub mod foundation;
pub mod matching;
pub mod posting;
