//! WebSocket upgrade handler for gate-approval connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Upgrade to WebSocket and allocate a client ID
//! 2. Wait for the client to declare a flat room (`join-flat-room`)
//! 3. Forward room broadcasts until disconnect
//! 4. Clean up room membership exactly once
//!
//! # Security
//!
//! The connection is anonymous: `join-flat-room` admits any declared flat
//! without verifying the client is authorized for it. Identity is validated
//! at the HTTP layer for mutating calls only. A real deployment must verify
//! the declaring identity's authorization for the flat before admitting
//! membership.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::domain::foundation::{FlatId, Timestamp};

use super::{
    messages::{ClientMessage, ConnectedMessage, ErrorMessage, PongMessage, ServerMessage},
    rooms::{ClientId, RoomRegistry},
    GateUpdate,
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct GateSocketState {
    /// Room registry for flat-scoped routing.
    pub rooms: Arc<RoomRegistry>,
}

impl GateSocketState {
    /// Create a new WebSocket state.
    pub fn new(rooms: Arc<RoomRegistry>) -> Self {
        Self { rooms }
    }
}

/// Handle WebSocket upgrade requests for the gate relay.
///
/// Route: `GET /api/gate/live`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GateSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// A single task owns the connection: it multiplexes room broadcasts and
/// inbound client messages with `select!`, because the room receiver is
/// swapped whenever the client joins a different flat. Sends are
/// best-effort; the first failed send tears the connection down and nothing
/// is buffered or retried.
async fn handle_socket(socket: WebSocket, state: GateSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let client_id = ClientId::new();
    tracing::debug!(client_id = %client_id, "Gate device connected");

    let connected = ServerMessage::Connected(ConnectedMessage {
        client_id: client_id.to_string(),
        timestamp: Timestamp::now().to_rfc3339(),
    });

    if let Err(e) = send_message(&mut sender, &connected).await {
        tracing::debug!(client_id = %client_id, "Failed to send connected message: {}", e);
        return; // Client disconnected immediately
    }

    // None until the client declares a room; replaced on every join.
    let mut room_rx: Option<broadcast::Receiver<GateUpdate>> = None;

    loop {
        tokio::select! {
            update = recv_update(&mut room_rx) => {
                match update {
                    Some(update) => {
                        let msg = update.to_server_message();
                        if let Err(e) = send_message(&mut sender, &msg).await {
                            tracing::debug!(
                                client_id = %client_id,
                                "Send error, closing connection: {}",
                                e
                            );
                            break;
                        }
                    }
                    // Room channel closed underneath us; drop back to
                    // unsubscribed until the client joins again.
                    None => room_rx = None,
                }
            }

            inbound = receiver.next() => {
                match process_inbound(inbound, &client_id, &state, &mut sender, &mut room_rx).await {
                    ConnectionStep::Continue => {}
                    ConnectionStep::Closed => break,
                }
            }
        }
    }

    // Cleanup: leave exactly once, whatever ended the loop.
    state.rooms.leave(&client_id).await;
    tracing::debug!(client_id = %client_id, "Gate device disconnected");
}

enum ConnectionStep {
    Continue,
    Closed,
}

/// Await the next room update, or park forever while unsubscribed.
///
/// Returns `None` when the room channel is closed; lagged receivers skip
/// the dropped frames (at-most-once delivery permits the gap).
async fn recv_update(room_rx: &mut Option<broadcast::Receiver<GateUpdate>>) -> Option<GateUpdate> {
    match room_rx {
        Some(rx) => loop {
            match rx.recv().await {
                Ok(update) => return Some(update),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Client lagged behind room broadcasts");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        },
        None => std::future::pending().await,
    }
}

/// Process one inbound frame from the client.
async fn process_inbound(
    inbound: Option<Result<Message, axum::Error>>,
    client_id: &ClientId,
    state: &GateSocketState,
    sender: &mut SplitSink<WebSocket, Message>,
    room_rx: &mut Option<broadcast::Receiver<GateUpdate>>,
) -> ConnectionStep {
    match inbound {
        Some(Ok(Message::Text(text))) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::JoinFlatRoom { flat_id }) => {
                    join_room(flat_id, client_id, state, sender, room_rx).await;
                }
                Ok(ClientMessage::Ping) => {
                    let pong = ServerMessage::Pong(PongMessage {
                        timestamp: Timestamp::now().to_rfc3339(),
                    });
                    if send_message(sender, &pong).await.is_err() {
                        return ConnectionStep::Closed;
                    }
                }
                Err(e) => {
                    tracing::debug!(client_id = %client_id, "Unparseable client message: {}", e);
                }
            }
            ConnectionStep::Continue
        }
        Some(Ok(Message::Binary(_))) => {
            tracing::warn!(client_id = %client_id, "Received unsupported binary message");
            ConnectionStep::Continue
        }
        // Protocol ping/pong frames are handled by axum.
        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => ConnectionStep::Continue,
        Some(Ok(Message::Close(_))) => {
            tracing::debug!(client_id = %client_id, "Client sent close frame");
            ConnectionStep::Closed
        }
        Some(Err(e)) => {
            tracing::debug!(client_id = %client_id, "Receive error: {}", e);
            ConnectionStep::Closed
        }
        None => ConnectionStep::Closed,
    }
}

/// Apply a `join-flat-room` declaration.
///
/// Fire-and-forget on success (no acknowledgement payload); a malformed
/// flat id gets an error frame so the client can correct itself.
async fn join_room(
    flat_id: String,
    client_id: &ClientId,
    state: &GateSocketState,
    sender: &mut SplitSink<WebSocket, Message>,
    room_rx: &mut Option<broadcast::Receiver<GateUpdate>>,
) {
    let flat_id: FlatId = match flat_id.parse() {
        Ok(id) => id,
        Err(_) => {
            let error = ServerMessage::Error(ErrorMessage {
                code: "INVALID_FLAT_ID".to_string(),
                message: "Flat id is not a valid UUID".to_string(),
                timestamp: Timestamp::now().to_rfc3339(),
            });
            let _ = send_message(sender, &error).await;
            return;
        }
    };

    // Replacing the receiver drops the old subscription, completing the
    // single-membership swap the registry began.
    *room_rx = Some(state.rooms.join(&flat_id, client_id.clone()).await);
    tracing::info!(client_id = %client_id, flat_id = %flat_id, "Client joined flat room");
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).expect("ServerMessage serialization should not fail");
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", websocket_router().with_state(ws_state));
/// ```
pub fn websocket_router() -> axum::Router<GateSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/gate/live", get(ws_handler))
}
