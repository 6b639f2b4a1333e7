//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers hand posting events to this port after the aggregate has been
//! saved; delivery to notification or analytics subscribers is the
//! adapter's concern.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (subscribers may see duplicates)
/// - Events from one `publish_all` call keep their order
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// let envelope = EventEnvelope::from_event(&event)?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    ///
    /// Adapters without batch support publish sequentially and stop at the
    /// first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
