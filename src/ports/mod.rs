//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events after durable writes
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Collaborator Ports
//!
//! - `VisitorRepository` - The durable visitor record store
//! - `FlatDirectory` - Resident-flat registry used for label resolution

mod event_publisher;
mod event_subscriber;
mod flat_directory;
mod visitor_repository;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use flat_directory::{FlatDirectory, FlatRecord};
pub use visitor_repository::VisitorRepository;
