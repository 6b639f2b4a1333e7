//! Storage adapters.
//!
//! - `InMemoryPostingRepository` - Map-backed posting store with optimistic versioning

mod in_memory_posting_repository;

pub use in_memory_posting_repository::InMemoryPostingRepository;
