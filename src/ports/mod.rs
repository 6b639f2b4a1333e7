//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PostingRepository` - Posting persistence, search and sweeps
//! - `EventPublisher` - Outbound domain events

mod event_publisher;
mod posting_repository;

pub use event_publisher::EventPublisher;
pub use posting_repository::PostingRepository;
