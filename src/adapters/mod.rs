//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Single-process event bus
//! - `http` - axum request/response plumbing
//! - `memory` - In-memory stand-ins for the durable collaborators
//! - `websocket` - The live notification relay

pub mod events;
pub mod http;
pub mod memory;
pub mod websocket;

pub use events::InMemoryEventBus;
pub use memory::{InMemoryFlatDirectory, InMemoryVisitorRepository};
