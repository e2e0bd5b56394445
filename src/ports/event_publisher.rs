//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the write path publishes post-commit events without
//! knowing about the underlying dispatch mechanism.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Callers invoke `publish` strictly after the corresponding durable write
/// has succeeded; the publisher never waits on storage. Zero subscribers for
/// an event is a normal outcome, not an error.
///
/// # Example
///
/// ```ignore
/// let envelope = event.to_envelope().with_actor(resident.to_string());
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// Events are dispatched sequentially with best-effort delivery; a
    /// handler failure stops the batch and is propagated to the caller.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
