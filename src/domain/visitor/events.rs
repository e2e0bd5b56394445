//! Domain events emitted after durable visitor writes.
//!
//! Both events are published by the write gateway strictly after the store
//! has accepted the corresponding write; they report committed state, never
//! cause it. The `flat_id` field doubles as the routing key for topic-scoped
//! fan-out.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEvent, EventId, FlatId, Timestamp, UserId, VisitorId};

use super::{VisitorRequest, VisitorStatus};

/// Event type string for visitor creation.
pub const VISITOR_CREATED: &str = "visitor.created";

/// Event type string for visitor resolution.
pub const VISITOR_RESOLVED: &str = "visitor.resolved";

/// A visitor request was durably created with `Pending` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorRequestCreated {
    pub event_id: EventId,
    pub visitor_id: VisitorId,
    pub flat_id: FlatId,
    /// Resolved display label for the destination flat (e.g. "B-204"),
    /// when the directory knows the flat.
    pub flat_label: Option<String>,
    pub visitor_name: String,
    pub photo_reference: String,
    pub status: VisitorStatus,
    pub created_at: Timestamp,
}

impl VisitorRequestCreated {
    /// Builds the event from a freshly persisted request.
    pub fn from_request(request: &VisitorRequest, flat_label: Option<String>) -> Self {
        Self {
            event_id: EventId::new(),
            visitor_id: *request.id(),
            flat_id: *request.flat_id(),
            flat_label,
            visitor_name: request.visitor_name().to_string(),
            photo_reference: request.photo_reference().to_string(),
            status: request.status(),
            created_at: *request.created_at(),
        }
    }
}

impl DomainEvent for VisitorRequestCreated {
    fn event_type(&self) -> &'static str {
        VISITOR_CREATED
    }

    fn aggregate_id(&self) -> String {
        self.visitor_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.created_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}

/// A visitor request transitioned to a terminal status in the durable store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorRequestResolved {
    pub event_id: EventId,
    pub visitor_id: VisitorId,
    pub flat_id: FlatId,
    pub visitor_name: String,
    pub status: VisitorStatus,
    pub decided_by: UserId,
    pub decided_at: Timestamp,
}

impl VisitorRequestResolved {
    /// Builds the event from a resolved request.
    ///
    /// Returns `None` when the request carries no decision yet; the gateway
    /// treats that as a caller contract violation.
    pub fn from_request(request: &VisitorRequest) -> Option<Self> {
        let decided_by = request.decided_by()?.clone();
        let decided_at = *request.decided_at()?;

        Some(Self {
            event_id: EventId::new(),
            visitor_id: *request.id(),
            flat_id: *request.flat_id(),
            visitor_name: request.visitor_name().to_string(),
            status: request.status(),
            decided_by,
            decided_at,
        })
    }
}

impl DomainEvent for VisitorRequestResolved {
    fn event_type(&self) -> &'static str {
        VISITOR_RESOLVED
    }

    fn aggregate_id(&self) -> String {
        self.visitor_id.to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        self.decided_at
    }

    fn event_id(&self) -> EventId {
        self.event_id.clone()
    }
}
