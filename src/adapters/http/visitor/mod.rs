//! Visitor HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    LogVisitorRequest, ResolveVisitorRequest, VisitorCommandResponse, VisitorResponse,
};
pub use handlers::VisitorHandlers;
pub use routes::visitor_routes;
