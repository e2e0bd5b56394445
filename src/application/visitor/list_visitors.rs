//! ListVisitorsHandler - Query handlers for visitor history.
//!
//! These reads double as the recovery path for clients that connected after
//! a notification was broadcast: live events are never replayed, so a
//! reconnecting device re-fetches the flat's history here.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, FlatId};
use crate::domain::visitor::VisitorRequest;
use crate::ports::VisitorRepository;

/// Handler for visitor history queries.
pub struct ListVisitorsHandler {
    repository: Arc<dyn VisitorRepository>,
}

impl ListVisitorsHandler {
    pub fn new(repository: Arc<dyn VisitorRepository>) -> Self {
        Self { repository }
    }

    /// All visitor requests across the society, newest first.
    pub async fn all(&self) -> Result<Vec<VisitorRequest>, DomainError> {
        self.repository.list_all().await
    }

    /// One flat's visit history, newest first.
    pub async fn by_flat(&self, flat_id: &FlatId) -> Result<Vec<VisitorRequest>, DomainError> {
        self.repository.list_by_flat(flat_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryVisitorRepository;
    use crate::domain::foundation::VisitorId;

    async fn seed(repository: &InMemoryVisitorRepository, flat_id: FlatId, name: &str) {
        let request = VisitorRequest::new(
            VisitorId::new(),
            name.to_string(),
            "https://img.example.com/photo.jpg".to_string(),
            flat_id,
        )
        .unwrap();
        repository.insert(&request).await.unwrap();
    }

    #[tokio::test]
    async fn all_returns_every_request() {
        let repository = Arc::new(InMemoryVisitorRepository::new());
        seed(&repository, FlatId::new(), "Sam").await;
        seed(&repository, FlatId::new(), "Alex").await;

        let handler = ListVisitorsHandler::new(repository);
        assert_eq!(handler.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn by_flat_filters_to_that_flat() {
        let repository = Arc::new(InMemoryVisitorRepository::new());
        let flat_a = FlatId::new();
        seed(&repository, flat_a, "Sam").await;
        seed(&repository, FlatId::new(), "Alex").await;

        let handler = ListVisitorsHandler::new(repository);
        let visitors = handler.by_flat(&flat_a).await.unwrap();
        assert_eq!(visitors.len(), 1);
        assert_eq!(visitors[0].visitor_name(), "Sam");
    }

    #[tokio::test]
    async fn by_flat_is_empty_for_unknown_flat() {
        let repository = Arc::new(InMemoryVisitorRepository::new());
        let handler = ListVisitorsHandler::new(repository);
        assert!(handler.by_flat(&FlatId::new()).await.unwrap().is_empty());
    }
}
