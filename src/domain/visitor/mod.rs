//! Visitor module - The visitor request aggregate and its lifecycle.
//!
//! A visitor request is created `Pending` when a gate device logs a visitor,
//! and is resolved exactly once to `Approved` or `Denied` by a resident.
//! Both resolutions are terminal: the durable record is the source of truth
//! for status and no transition leaves a terminal state.

mod events;
mod request;
mod status;

pub use events::{VisitorRequestCreated, VisitorRequestResolved, VISITOR_CREATED, VISITOR_RESOLVED};
pub use request::VisitorRequest;
pub use status::VisitorStatus;
