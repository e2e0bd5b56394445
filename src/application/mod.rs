//! Application layer - Use-case orchestration.
//!
//! - `gateway` - The post-commit hook translating durable writes into publishes
//! - `visitor` - Command and query handlers for visitor requests

pub mod gateway;
pub mod visitor;

pub use gateway::VisitorWriteGateway;
