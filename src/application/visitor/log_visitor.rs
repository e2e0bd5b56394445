//! LogVisitorHandler - Command handler for logging a visitor at the gate.

use std::sync::Arc;

use crate::application::gateway::VisitorWriteGateway;
use crate::domain::foundation::{DomainError, ErrorCode, FlatId, VisitorId};
use crate::domain::visitor::VisitorRequest;
use crate::ports::{FlatDirectory, VisitorRepository};

/// Command to log a new visitor request.
#[derive(Debug, Clone)]
pub struct LogVisitorCommand {
    pub visitor_name: String,
    pub photo_reference: String,
    pub flat_id: FlatId,
}

/// Handler for logging visitors.
pub struct LogVisitorHandler {
    repository: Arc<dyn VisitorRepository>,
    directory: Arc<dyn FlatDirectory>,
    gateway: Arc<VisitorWriteGateway>,
}

impl LogVisitorHandler {
    pub fn new(
        repository: Arc<dyn VisitorRepository>,
        directory: Arc<dyn FlatDirectory>,
        gateway: Arc<VisitorWriteGateway>,
    ) -> Self {
        Self {
            repository,
            directory,
            gateway,
        }
    }

    pub async fn handle(&self, cmd: LogVisitorCommand) -> Result<VisitorRequest, DomainError> {
        // 1. The destination flat must exist; the notification would be
        //    unroutable otherwise.
        if self.directory.lookup(&cmd.flat_id).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::FlatNotFound,
                format!("No flat with id {}", cmd.flat_id),
            ));
        }

        // 2. Create the pending aggregate
        let request = VisitorRequest::new(
            VisitorId::new(),
            cmd.visitor_name,
            cmd.photo_reference,
            cmd.flat_id,
        )?;

        // 3. Durable write
        self.repository.insert(&request).await?;

        // 4. Post-commit notification
        self.gateway.notify_created(&request).await?;

        Ok(request)
    }
}
