//! Event bridge connecting visitor events to WebSocket clients.
//!
//! Subscribes to the visitor events the write gateway publishes and
//! broadcasts them to the devices subscribed to the owning flat's room.
//! This is the fan-out half of the coordination path: the envelope reports
//! state the durable store has already committed, so the bridge never
//! touches storage.
//!
//! # Event Flow
//!
//! ```text
//! Durable write committed
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  VisitorWriteGateway│
//! │  publishes envelope│
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │   GateEventBridge  │
//! │  Transform to      │
//! │  GateUpdate        │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Resolve flat from │
//! │  payload           │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Broadcast to that │
//! │  flat's room only  │
//! └────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope, FlatId};
use crate::domain::visitor::{VISITOR_CREATED, VISITOR_RESOLVED};
use crate::ports::{EventHandler, EventSubscriber};

use super::messages::{GateUpdate, GateUpdateKind};
use super::rooms::RoomRegistry;

/// Event types that are relayed to connected gate devices.
pub const GATE_EVENT_TYPES: &[&str] = &[VISITOR_CREATED, VISITOR_RESOLVED];

/// Bridge between the event bus and WebSocket rooms.
///
/// Implements `EventHandler` to receive visitor events and broadcast them
/// to clients in the owning flat's room. Resolution events are scoped to
/// that room as well: devices watching other flats never see them.
pub struct GateEventBridge {
    rooms: Arc<RoomRegistry>,
}

impl GateEventBridge {
    /// Create a new event bridge over the given room registry.
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self { rooms }
    }

    /// Create as an Arc (for sharing with an event subscriber).
    pub fn new_shared(rooms: Arc<RoomRegistry>) -> Arc<Self> {
        Arc::new(Self::new(rooms))
    }

    /// Register this bridge with an event subscriber for all gate events.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let bridge = GateEventBridge::new_shared(rooms);
    /// bridge.register(bus.as_ref());
    /// ```
    pub fn register(self: &Arc<Self>, subscriber: &impl EventSubscriber) {
        subscriber.subscribe_all(GATE_EVENT_TYPES, self.clone());
    }

    /// Transform an event envelope into a gate update.
    ///
    /// Returns `None` if the event type is not relevant for gate devices.
    fn transform(&self, event: &EventEnvelope) -> Option<GateUpdate> {
        let kind = match event.event_type.as_str() {
            VISITOR_CREATED => GateUpdateKind::Created,
            VISITOR_RESOLVED => GateUpdateKind::Resolved,
            _ => return None,
        };

        Some(GateUpdate {
            kind,
            data: event.payload.clone(),
            timestamp: event.occurred_at,
        })
    }

    /// Resolve the destination flat from an event envelope.
    ///
    /// Visitor events carry `flat_id` in the payload as the routing key.
    fn resolve_flat_id(&self, event: &EventEnvelope) -> Option<FlatId> {
        event
            .payload
            .get("flat_id")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
    }
}

#[async_trait]
impl EventHandler for GateEventBridge {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(update) = self.transform(&event) else {
            return Ok(()); // Event not relevant for gate devices
        };

        let Some(flat_id) = self.resolve_flat_id(&event) else {
            tracing::debug!(
                event_type = %event.event_type,
                aggregate_id = %event.aggregate_id,
                "Cannot resolve flat ID for event, skipping broadcast"
            );
            return Ok(()); // Can't route without a flat
        };

        let recipients = self.rooms.broadcast_to_flat(&flat_id, update).await;

        if recipients == 0 {
            // Nobody subscribed at the instant of publish; expected for a
            // best-effort relay, surfaced as a metric-grade trace only.
            tracing::debug!(
                event_type = %event.event_type,
                flat_id = %flat_id,
                "No subscribers for flat at publish time"
            );
        } else {
            tracing::debug!(
                event_type = %event.event_type,
                flat_id = %flat_id,
                recipients,
                "Broadcast visitor event to flat room"
            );
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "GateEventBridge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::rooms::ClientId;
    use crate::domain::foundation::{
        EventId, EventMetadata, SerializableDomainEvent, Timestamp, UserId, VisitorId,
    };
    use crate::domain::visitor::{
        VisitorRequest, VisitorRequestCreated, VisitorRequestResolved, VisitorStatus,
    };
    use serde_json::json;

    fn pending_request(flat_id: FlatId) -> VisitorRequest {
        VisitorRequest::new(
            VisitorId::new(),
            "Sam".to_string(),
            "https://img.example.com/sam.jpg".to_string(),
            flat_id,
        )
        .unwrap()
    }

    fn created_envelope(flat_id: FlatId) -> EventEnvelope {
        let request = pending_request(flat_id);
        VisitorRequestCreated::from_request(&request, Some("A-101".to_string())).to_envelope()
    }

    fn resolved_envelope(flat_id: FlatId) -> EventEnvelope {
        let mut request = pending_request(flat_id);
        request
            .resolve(VisitorStatus::Approved, UserId::new("resident-x").unwrap())
            .unwrap();
        VisitorRequestResolved::from_request(&request)
            .unwrap()
            .to_envelope()
    }

    #[test]
    fn transform_created_event_to_created_update() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));

        let update = bridge.transform(&created_envelope(FlatId::new())).unwrap();
        assert_eq!(update.kind, GateUpdateKind::Created);
        assert_eq!(update.data["visitor_name"], json!("Sam"));
    }

    #[test]
    fn transform_resolved_event_to_resolved_update() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));

        let update = bridge.transform(&resolved_envelope(FlatId::new())).unwrap();
        assert_eq!(update.kind, GateUpdateKind::Resolved);
        assert_eq!(update.data["status"], json!("approved"));
    }

    #[test]
    fn transform_unknown_event_returns_none() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));

        let event = EventEnvelope {
            event_id: EventId::new(),
            event_type: "ticket.created".to_string(),
            aggregate_id: "some-id".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        };

        assert!(bridge.transform(&event).is_none());
    }

    #[test]
    fn resolve_flat_id_reads_payload_routing_key() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));
        let flat_id = FlatId::new();

        let resolved = bridge.resolve_flat_id(&created_envelope(flat_id));
        assert_eq!(resolved, Some(flat_id));
    }

    #[test]
    fn resolve_flat_id_returns_none_when_missing() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));

        let event = EventEnvelope {
            event_id: EventId::new(),
            event_type: VISITOR_CREATED.to_string(),
            aggregate_id: "v-1".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({"visitor_name": "Sam"}), // No flat_id
            metadata: EventMetadata::default(),
        };

        assert!(bridge.resolve_flat_id(&event).is_none());
    }

    #[tokio::test]
    async fn handle_broadcasts_to_the_owning_flat_only() {
        let rooms = Arc::new(RoomRegistry::default());
        let bridge = GateEventBridge::new(rooms.clone());

        let flat_a = FlatId::new();
        let flat_b = FlatId::new();
        let mut rx_a = rooms.join(&flat_a, ClientId::new()).await;
        let mut rx_b = rooms.join(&flat_b, ClientId::new()).await;

        bridge.handle(created_envelope(flat_a)).await.unwrap();

        let received = rx_a.recv().await.unwrap();
        assert_eq!(received.kind, GateUpdateKind::Created);
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn handle_with_zero_subscribers_succeeds() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));

        let result = bridge.handle(created_envelope(FlatId::new())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn handle_skips_unroutable_events() {
        let bridge = GateEventBridge::new(Arc::new(RoomRegistry::default()));

        let event = EventEnvelope {
            event_id: EventId::new(),
            event_type: VISITOR_RESOLVED.to_string(),
            aggregate_id: "v-1".to_string(),
            occurred_at: Timestamp::now(),
            payload: json!({}),
            metadata: EventMetadata::default(),
        };

        assert!(bridge.handle(event).await.is_ok());
    }

    #[tokio::test]
    async fn resolution_reaches_all_devices_on_the_flat() {
        let rooms = Arc::new(RoomRegistry::default());
        let bridge = GateEventBridge::new(rooms.clone());

        let flat_id = FlatId::new();
        let mut phone = rooms.join(&flat_id, ClientId::new()).await;
        let mut gate_screen = rooms.join(&flat_id, ClientId::new()).await;

        bridge.handle(resolved_envelope(flat_id)).await.unwrap();

        assert_eq!(phone.recv().await.unwrap().kind, GateUpdateKind::Resolved);
        assert_eq!(
            gate_screen.recv().await.unwrap().kind,
            GateUpdateKind::Resolved
        );
    }

    #[test]
    fn gate_event_types_cover_both_flows() {
        assert!(GATE_EVENT_TYPES.contains(&"visitor.created"));
        assert!(GATE_EVENT_TYPES.contains(&"visitor.resolved"));
    }
}
