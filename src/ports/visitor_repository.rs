//! VisitorRepository port - Interface to the durable visitor record store.
//!
//! The store is an external collaborator: it is always the source of truth
//! for a request's status. The coordination core only reads and writes
//! through this port; live notifications report state this store has
//! already committed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FlatId, VisitorId};
use crate::domain::visitor::VisitorRequest;

/// Port for persisting and querying visitor requests.
#[async_trait]
pub trait VisitorRepository: Send + Sync {
    /// Persist a newly created request.
    async fn insert(&self, request: &VisitorRequest) -> Result<(), DomainError>;

    /// Persist a status change to an existing request.
    ///
    /// # Errors
    ///
    /// - `VisitorNotFound` if no record exists for the request's id
    async fn update(&self, request: &VisitorRequest) -> Result<(), DomainError>;

    /// Fetch a request by id.
    async fn find_by_id(&self, id: &VisitorId) -> Result<Option<VisitorRequest>, DomainError>;

    /// All requests, newest first.
    async fn list_all(&self) -> Result<Vec<VisitorRequest>, DomainError>;

    /// A flat's visit history, newest first.
    ///
    /// This is the recovery read path for clients that joined after a
    /// notification was broadcast.
    async fn list_by_flat(&self, flat_id: &FlatId) -> Result<Vec<VisitorRequest>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn VisitorRepository) {}
}
