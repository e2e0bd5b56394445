//! HTTP routes for flat directory endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{list_flats, register_flat, FlatHandlers};

/// Creates the flat directory router.
pub fn flat_routes(handlers: FlatHandlers) -> Router {
    Router::new()
        .route("/", post(register_flat))
        .route("/", get(list_flats))
        .with_state(handlers)
}
