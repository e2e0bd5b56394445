//! External write gateway - the post-commit notification hook.
//!
//! The CRUD write path calls `notify_created`/`notify_resolved` strictly
//! after a successful durable write, never before. That ordering is the
//! core consistency invariant: a client observing a live event can re-fetch
//! the same state from the store and get a consistent result. The gateway
//! itself never waits on storage; by the time it runs, the write is done.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SerializableDomainEvent};
use crate::domain::visitor::{VisitorRequest, VisitorRequestCreated, VisitorRequestResolved};
use crate::ports::{EventPublisher, FlatDirectory};

/// Thin adapter between the durable write path and the live relay.
pub struct VisitorWriteGateway {
    directory: Arc<dyn FlatDirectory>,
    publisher: Arc<dyn EventPublisher>,
}

impl VisitorWriteGateway {
    pub fn new(directory: Arc<dyn FlatDirectory>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            directory,
            publisher,
        }
    }

    /// Announce a freshly created (pending) visitor request.
    ///
    /// Resolves the destination flat's display label so resident devices can
    /// render the notification without another lookup. An unknown flat still
    /// publishes, just without a label.
    pub async fn notify_created(&self, request: &VisitorRequest) -> Result<(), DomainError> {
        let flat_label = self
            .directory
            .lookup(request.flat_id())
            .await?
            .map(|flat| flat.label());

        let event = VisitorRequestCreated::from_request(request, flat_label);
        let envelope = event.to_envelope();

        tracing::info!(
            visitor_id = %request.id(),
            flat_id = %request.flat_id(),
            "Publishing visitor-created notification"
        );

        self.publisher.publish(envelope).await
    }

    /// Announce the single authoritative resolution of a visitor request.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the request carries no decision; the
    ///   caller violated the after-write contract
    pub async fn notify_resolved(&self, request: &VisitorRequest) -> Result<(), DomainError> {
        let event = VisitorRequestResolved::from_request(request).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "notify_resolved called for a request without a recorded decision",
            )
        })?;

        let envelope = event
            .to_envelope()
            .with_actor(event.decided_by.to_string());

        tracing::info!(
            visitor_id = %request.id(),
            flat_id = %request.flat_id(),
            status = %request.status(),
            "Publishing visitor-resolved notification"
        );

        self.publisher.publish(envelope).await
    }
}
