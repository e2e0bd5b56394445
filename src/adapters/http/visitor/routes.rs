//! HTTP routes for visitor endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    list_flat_visitors, list_visitors, log_visitor, resolve_visitor, VisitorHandlers,
};

/// Creates the visitor router with all endpoints.
pub fn visitor_routes(handlers: VisitorHandlers) -> Router {
    Router::new()
        .route("/", post(log_visitor))
        .route("/", get(list_visitors))
        .route("/:id/status", put(resolve_visitor))
        .route("/flat/:flat_id", get(list_flat_visitors))
        .with_state(handlers)
}
