//! WebSocket adapters for real-time gate-approval coordination.
//!
//! This module pushes visitor events to connected devices (resident apps and
//! gate screens) over persistent WebSocket connections, scoped to the
//! destination flat's room.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Event Bus                                    │
//! │            visitor.created │ visitor.resolved                       │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ subscribes
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       GateEventBridge                                │
//! │   - Transforms EventEnvelope → GateUpdate                           │
//! │   - Resolves the destination flat from the payload                  │
//! │   - Routes to exactly that flat's room                              │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ broadcasts
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        RoomRegistry                                  │
//! │   Room: flat A-101       Room: flat B-204                           │
//! │   ├── resident phone     ├── resident phone                         │
//! │   ├── resident tablet    └── gate screen                            │
//! │   └── gate screen                                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket wire protocol types
//! - [`rooms`] - Flat-scoped topic registry
//! - [`handler`] - Axum WebSocket upgrade handler and connection lifecycle
//! - [`event_bridge`] - Bridge between event bus and rooms

pub mod event_bridge;
pub mod handler;
pub mod messages;
pub mod rooms;

pub use event_bridge::{GateEventBridge, GATE_EVENT_TYPES};
pub use handler::{websocket_router, ws_handler, GateSocketState};
pub use messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, GateEventMessage, GateUpdate, GateUpdateKind,
    PongMessage, ServerMessage,
};
pub use rooms::{ClientId, RoomRegistry};
