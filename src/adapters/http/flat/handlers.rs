//! HTTP handlers for flat directory endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::{domain_error_response, ErrorResponse};
use crate::domain::foundation::FlatId;
use crate::ports::{FlatDirectory, FlatRecord};

use super::dto::{FlatResponse, RegisterFlatRequest};

#[derive(Clone)]
pub struct FlatHandlers {
    directory: Arc<dyn FlatDirectory>,
}

impl FlatHandlers {
    pub fn new(directory: Arc<dyn FlatDirectory>) -> Self {
        Self { directory }
    }
}

/// POST /api/flats - Register a flat in the directory
pub async fn register_flat(
    State(handlers): State<FlatHandlers>,
    Json(req): Json<RegisterFlatRequest>,
) -> Response {
    if req.block.trim().is_empty() || req.number.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Block and number are required")),
        )
            .into_response();
    }

    let record = FlatRecord {
        id: FlatId::new(),
        block: req.block,
        number: req.number,
    };

    match handlers.directory.register(record.clone()).await {
        Ok(()) => (StatusCode::CREATED, Json(FlatResponse::from(&record))).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/flats - List all registered flats
pub async fn list_flats(State(handlers): State<FlatHandlers>) -> Response {
    match handlers.directory.list_all().await {
        Ok(records) => {
            let views: Vec<FlatResponse> = records.iter().map(FlatResponse::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
