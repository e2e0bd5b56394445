//! Visitor use-case handlers.
//!
//! Each handler performs the durable write first and invokes the write
//! gateway after, so the write-then-publish ordering is enforced by
//! structure rather than convention.

mod list_visitors;
mod log_visitor;
mod resolve_visitor;

pub use list_visitors::ListVisitorsHandler;
pub use log_visitor::{LogVisitorCommand, LogVisitorHandler};
pub use resolve_visitor::{ResolveVisitorCommand, ResolveVisitorHandler};
