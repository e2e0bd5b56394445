//! ResolveVisitorHandler - Command handler for the resident decision.
//!
//! Two resident devices may race to resolve the same request. The first
//! durable write wins; the aggregate guard rejects the second attempt with
//! `StaleTransition` before any write or publish, so exactly one
//! authoritative resolution is ever broadcast.

use std::sync::Arc;

use crate::application::gateway::VisitorWriteGateway;
use crate::domain::foundation::{DomainError, ErrorCode, UserId, VisitorId};
use crate::domain::visitor::{VisitorRequest, VisitorStatus};
use crate::ports::VisitorRepository;

/// Command to resolve a pending visitor request.
#[derive(Debug, Clone)]
pub struct ResolveVisitorCommand {
    pub visitor_id: VisitorId,
    pub resolution: VisitorStatus,
    pub decided_by: UserId,
}

/// Handler for resolving visitor requests.
pub struct ResolveVisitorHandler {
    repository: Arc<dyn VisitorRepository>,
    gateway: Arc<VisitorWriteGateway>,
}

impl ResolveVisitorHandler {
    pub fn new(repository: Arc<dyn VisitorRepository>, gateway: Arc<VisitorWriteGateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    pub async fn handle(&self, cmd: ResolveVisitorCommand) -> Result<VisitorRequest, DomainError> {
        // 1. Load the authoritative record
        let mut request = self
            .repository
            .find_by_id(&cmd.visitor_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::VisitorNotFound,
                    format!("No visitor request with id {}", cmd.visitor_id),
                )
            })?;

        // 2. State-machine guard; a stale attempt stops here and the caller
        //    learns the current status from the error details
        request.resolve(cmd.resolution, cmd.decided_by)?;

        // 3. Durable write
        self.repository.update(&request).await?;

        // 4. Post-commit notification, scoped to the owning flat
        self.gateway.notify_resolved(&request).await?;

        Ok(request)
    }
}
