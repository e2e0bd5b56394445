//! HTTP DTOs for visitor endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::visitor::{VisitorRequest, VisitorStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to log a visitor at the gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogVisitorRequest {
    pub visitor_name: String,
    pub photo_reference: String,
    pub flat_id: String,
}

/// Request to resolve a pending visitor.
///
/// `decided_by` carries the resident identity the auth collaborator
/// attached to the request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveVisitorRequest {
    pub status: VisitorStatus,
    pub decided_by: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for visitor command operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorCommandResponse {
    pub message: String,
    pub visitor: VisitorResponse,
}

/// Visitor request view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
    pub id: String,
    pub visitor_name: String,
    pub photo_reference: String,
    pub flat_id: String,
    pub status: VisitorStatus,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<String>,
}

impl From<&VisitorRequest> for VisitorResponse {
    fn from(request: &VisitorRequest) -> Self {
        Self {
            id: request.id().to_string(),
            visitor_name: request.visitor_name().to_string(),
            photo_reference: request.photo_reference().to_string(),
            flat_id: request.flat_id().to_string(),
            status: request.status(),
            created_at: request.created_at().to_rfc3339(),
            decided_by: request.decided_by().map(|u| u.to_string()),
            decided_at: request.decided_at().map(|t| t.to_rfc3339()),
        }
    }
}
