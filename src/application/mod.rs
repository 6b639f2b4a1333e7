//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate postings and publish their events; the matching
//! query reads and scores without writing.

pub mod handlers;
pub mod reaper;
pub mod state;

pub use handlers::*;
pub use reaper::{ExpiryReaper, ExpiryReaperConfig};
pub use state::PostingAppState;
