//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event bus implementations
//! - `storage` - Posting persistence

pub mod events;
pub mod storage;

pub use events::InMemoryEventBus;
pub use storage::InMemoryPostingRepository;
