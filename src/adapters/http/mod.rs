//! HTTP adapters - request/response plumbing around the coordination core.
//!
//! Ordinary CRUD surface: the interesting behavior (fan-out, ordering,
//! stale-transition rejection) lives in the application and websocket
//! layers; these handlers translate HTTP to commands and domain errors to
//! status codes.

pub mod flat;
pub mod visitor;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub details: std::collections::HashMap<String, String>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: Default::default(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Map a domain error onto an HTTP response.
///
/// `StaleTransition` is a conflict: the body's `current_status` detail tells
/// the caller what the record authoritatively is.
pub fn domain_error_response(err: DomainError) -> Response {
    let status = match err.code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::VisitorNotFound | ErrorCode::FlatNotFound => StatusCode::NOT_FOUND,
        ErrorCode::StaleTransition => StatusCode::CONFLICT,
        ErrorCode::InvalidStateTransition => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "Request failed with internal error");
    }

    (status, Json(ErrorResponse::from(&err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_transition_maps_to_conflict() {
        let response = domain_error_response(DomainError::stale_transition("Approved"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_codes_map_to_404() {
        let response =
            domain_error_response(DomainError::new(ErrorCode::VisitorNotFound, "missing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = domain_error_response(DomainError::new(ErrorCode::FlatNotFound, "missing"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let response = domain_error_response(DomainError::validation("visitor_name", "empty"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_response_preserves_details() {
        let err = DomainError::stale_transition("Denied");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "STALE_TRANSITION");
        assert_eq!(body.details.get("current_status"), Some(&"Denied".to_string()));
    }
}
