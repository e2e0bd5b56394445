//! WebSocket message types for gate-approval coordination.
//!
//! Defines the protocol between server and connected devices:
//! - Server → Client: connection status, visitor events, errors, pongs
//! - Client → Server: room join declarations, pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established; the client is anonymous until it joins a room.
    Connected(ConnectedMessage),

    /// A visitor requested entry for the joined flat.
    #[serde(rename = "visitor-request-created")]
    VisitorRequestCreated(GateEventMessage),

    /// A visitor request for the joined flat was approved or denied.
    #[serde(rename = "visitor-request-resolved")]
    VisitorRequestResolved(GateEventMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent when a client successfully connects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub client_id: String,
    pub timestamp: String,
}

/// A visitor event with the full request payload.
///
/// For created events the payload carries the request with the flat label
/// resolved; for resolved events it carries the final status and decider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateEventMessage {
    pub data: serde_json::Value,
    pub timestamp: String,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Declare membership in a flat's room. Fire-and-forget: there is no
    /// acknowledgement payload, and a later join replaces the earlier one.
    #[serde(rename = "join-flat-room")]
    #[serde(rename_all = "camelCase")]
    JoinFlatRoom { flat_id: String },

    /// Heartbeat request.
    Ping,
}

// ============================================
// Internal Types
// ============================================

/// Which visitor flow produced an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateUpdateKind {
    Created,
    Resolved,
}

/// Internal representation of a visitor update for room broadcasting.
///
/// This is what the event bridge creates and sends to rooms.
#[derive(Debug, Clone)]
pub struct GateUpdate {
    pub kind: GateUpdateKind,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl GateUpdate {
    /// Convert to a server message for sending to clients.
    pub fn to_server_message(self) -> ServerMessage {
        let message = GateEventMessage {
            data: self.data,
            timestamp: self.timestamp.to_rfc3339(),
        };
        match self.kind {
            GateUpdateKind::Created => ServerMessage::VisitorRequestCreated(message),
            GateUpdateKind::Resolved => ServerMessage::VisitorRequestResolved(message),
        }
    }
}
