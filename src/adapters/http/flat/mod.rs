//! Flat directory HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{FlatResponse, RegisterFlatRequest};
pub use handlers::FlatHandlers;
pub use routes::flat_routes;
