//! Visitor request aggregate entity.
//!
//! The unit of coordination between the gate and the resident: created
//! `Pending` by the gate device, resolved exactly once by a resident.
//!
//! The aggregate is a guard, not the writer — `resolve` exists so a second
//! resolving write against a terminal request is rejected instead of
//! silently overwriting the first decision.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, FlatId, StateMachine, Timestamp, UserId, VisitorId,
};

use super::VisitorStatus;

/// Maximum length for a visitor's display name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Visitor request aggregate - a durable gate visit awaiting or having
/// received a resident decision.
///
/// # Invariants
///
/// - `id` and `flat_id` are immutable after creation
/// - `visitor_name` is 1-200 characters, non-empty
/// - `decided_by`/`decided_at` are set exactly when `status` is terminal
/// - once `status` leaves `Pending`, no further transition is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRequest {
    /// Unique identifier, assigned at creation.
    id: VisitorId,

    /// Visitor display name.
    visitor_name: String,

    /// Opaque URI to an externally stored photo; not interpreted here.
    photo_reference: String,

    /// Destination flat.
    flat_id: FlatId,

    /// Current lifecycle status.
    status: VisitorStatus,

    /// When the request was created.
    created_at: Timestamp,

    /// Resident who resolved the request, once resolved.
    decided_by: Option<UserId>,

    /// When the request was resolved, once resolved.
    decided_at: Option<Timestamp>,
}

impl VisitorRequest {
    /// Create a new pending visitor request.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the visitor name is empty or too long
    pub fn new(
        id: VisitorId,
        visitor_name: String,
        photo_reference: String,
        flat_id: FlatId,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&visitor_name)?;

        Ok(Self {
            id,
            visitor_name,
            photo_reference,
            flat_id,
            status: VisitorStatus::Pending,
            created_at: Timestamp::now(),
            decided_by: None,
            decided_at: None,
        })
    }

    /// Reconstitute a visitor request from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: VisitorId,
        visitor_name: String,
        photo_reference: String,
        flat_id: FlatId,
        status: VisitorStatus,
        created_at: Timestamp,
        decided_by: Option<UserId>,
        decided_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            visitor_name,
            photo_reference,
            flat_id,
            status,
            created_at,
            decided_by,
            decided_at,
        }
    }

    /// Resolve the request to `Approved` or `Denied`.
    ///
    /// This is the state-machine guard for the concurrent-resolution race:
    /// the first durable write wins, and a second resolving attempt is
    /// rejected here before any write or publish happens.
    ///
    /// # Errors
    ///
    /// - `StaleTransition` if the request is already terminal; the error
    ///   details carry the current authoritative status
    /// - `InvalidStateTransition` if `resolution` is not a terminal status
    pub fn resolve(&mut self, resolution: VisitorStatus, decided_by: UserId) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::stale_transition(self.status.to_string()));
        }

        if !resolution.is_resolution() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{} is not a resolving status", resolution),
            ));
        }

        self.status = self.status.transition_to(resolution)?;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(Timestamp::now());
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                "visitor_name",
                "Visitor name cannot be empty",
            ));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "visitor_name",
                format!("Visitor name exceeds {} characters", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &VisitorId {
        &self.id
    }

    pub fn visitor_name(&self) -> &str {
        &self.visitor_name
    }

    pub fn photo_reference(&self) -> &str {
        &self.photo_reference
    }

    pub fn flat_id(&self) -> &FlatId {
        &self.flat_id
    }

    pub fn status(&self) -> VisitorStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn decided_by(&self) -> Option<&UserId> {
        self.decided_by.as_ref()
    }

    pub fn decided_at(&self) -> Option<&Timestamp> {
        self.decided_at.as_ref()
    }
}
