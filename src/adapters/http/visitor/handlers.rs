//! HTTP handlers for visitor endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::{domain_error_response, ErrorResponse};
use crate::application::visitor::{
    ListVisitorsHandler, LogVisitorCommand, LogVisitorHandler, ResolveVisitorCommand,
    ResolveVisitorHandler,
};
use crate::domain::foundation::{FlatId, UserId, VisitorId};

use super::dto::{
    LogVisitorRequest, ResolveVisitorRequest, VisitorCommandResponse, VisitorResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct VisitorHandlers {
    log_handler: Arc<LogVisitorHandler>,
    resolve_handler: Arc<ResolveVisitorHandler>,
    list_handler: Arc<ListVisitorsHandler>,
}

impl VisitorHandlers {
    pub fn new(
        log_handler: Arc<LogVisitorHandler>,
        resolve_handler: Arc<ResolveVisitorHandler>,
        list_handler: Arc<ListVisitorsHandler>,
    ) -> Self {
        Self {
            log_handler,
            resolve_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/visitors - Security gate logs a new visitor
pub async fn log_visitor(
    State(handlers): State<VisitorHandlers>,
    Json(req): Json<LogVisitorRequest>,
) -> Response {
    let flat_id = match req.flat_id.parse::<FlatId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid flat ID")),
            )
                .into_response()
        }
    };

    let cmd = LogVisitorCommand {
        visitor_name: req.visitor_name,
        photo_reference: req.photo_reference,
        flat_id,
    };

    match handlers.log_handler.handle(cmd).await {
        Ok(request) => {
            let response = VisitorCommandResponse {
                message: "Visitor logged and resident notified".to_string(),
                visitor: VisitorResponse::from(&request),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// PUT /api/visitors/:id/status - Resident approves or denies a visitor
pub async fn resolve_visitor(
    State(handlers): State<VisitorHandlers>,
    Path(visitor_id): Path<String>,
    Json(req): Json<ResolveVisitorRequest>,
) -> Response {
    let visitor_id = match visitor_id.parse::<VisitorId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid visitor ID")),
            )
                .into_response()
        }
    };

    let decided_by = match UserId::new(req.decided_by) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let cmd = ResolveVisitorCommand {
        visitor_id,
        resolution: req.status,
        decided_by,
    };

    match handlers.resolve_handler.handle(cmd).await {
        Ok(request) => {
            let response = VisitorCommandResponse {
                message: format!("Visitor {}", request.status()),
                visitor: VisitorResponse::from(&request),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/visitors - All visitors across the society, newest first
pub async fn list_visitors(State(handlers): State<VisitorHandlers>) -> Response {
    match handlers.list_handler.all().await {
        Ok(requests) => {
            let views: Vec<VisitorResponse> = requests.iter().map(VisitorResponse::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/visitors/flat/:flat_id - One flat's visit history
///
/// The recovery read path: live events are never replayed, so reconnecting
/// devices re-fetch their flat's state here.
pub async fn list_flat_visitors(
    State(handlers): State<VisitorHandlers>,
    Path(flat_id): Path<String>,
) -> Response {
    let flat_id = match flat_id.parse::<FlatId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid flat ID")),
            )
                .into_response()
        }
    };

    match handlers.list_handler.by_flat(&flat_id).await {
        Ok(requests) => {
            let views: Vec<VisitorResponse> = requests.iter().map(VisitorResponse::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
