//! In-memory visitor repository.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, FlatId, VisitorId};
use crate::domain::visitor::VisitorRequest;
use crate::ports::VisitorRepository;

/// In-memory implementation of [`VisitorRepository`].
///
/// Listing order follows `created_at` descending, matching the history
/// views the read endpoints serve.
pub struct InMemoryVisitorRepository {
    records: RwLock<HashMap<VisitorId, VisitorRequest>>,
}

impl InMemoryVisitorRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    fn newest_first(mut requests: Vec<VisitorRequest>) -> Vec<VisitorRequest> {
        requests.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        requests
    }
}

impl Default for InMemoryVisitorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisitorRepository for InMemoryVisitorRepository {
    async fn insert(&self, request: &VisitorRequest) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert(*request.id(), request.clone());
        Ok(())
    }

    async fn update(&self, request: &VisitorRequest) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(request.id()) {
            Some(existing) => {
                *existing = request.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::VisitorNotFound,
                format!("No visitor request with id {}", request.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &VisitorId) -> Result<Option<VisitorRequest>, DomainError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<VisitorRequest>, DomainError> {
        let requests = self.records.read().await.values().cloned().collect();
        Ok(Self::newest_first(requests))
    }

    async fn list_by_flat(&self, flat_id: &FlatId) -> Result<Vec<VisitorRequest>, DomainError> {
        let requests = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.flat_id() == flat_id)
            .cloned()
            .collect();
        Ok(Self::newest_first(requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::visitor::VisitorStatus;

    fn request_for(flat_id: FlatId, name: &str) -> VisitorRequest {
        VisitorRequest::new(
            VisitorId::new(),
            name.to_string(),
            "https://img.example.com/photo.jpg".to_string(),
            flat_id,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = InMemoryVisitorRepository::new();
        let request = request_for(FlatId::new(), "Sam");

        repo.insert(&request).await.unwrap();

        let found = repo.find_by_id(request.id()).await.unwrap();
        assert_eq!(found, Some(request));
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let repo = InMemoryVisitorRepository::new();
        assert_eq!(repo.find_by_id(&VisitorId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_persists_resolution() {
        let repo = InMemoryVisitorRepository::new();
        let mut request = request_for(FlatId::new(), "Sam");
        repo.insert(&request).await.unwrap();

        request
            .resolve(VisitorStatus::Approved, UserId::new("resident-x").unwrap())
            .unwrap();
        repo.update(&request).await.unwrap();

        let found = repo.find_by_id(request.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), VisitorStatus::Approved);
    }

    #[tokio::test]
    async fn update_unknown_id_fails() {
        let repo = InMemoryVisitorRepository::new();
        let request = request_for(FlatId::new(), "Sam");

        let err = repo.update(&request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::VisitorNotFound);
    }

    #[tokio::test]
    async fn list_by_flat_filters_other_flats() {
        let repo = InMemoryVisitorRepository::new();
        let flat_a = FlatId::new();
        let flat_b = FlatId::new();

        repo.insert(&request_for(flat_a, "Sam")).await.unwrap();
        repo.insert(&request_for(flat_b, "Alex")).await.unwrap();
        repo.insert(&request_for(flat_a, "Robin")).await.unwrap();

        let for_a = repo.list_by_flat(&flat_a).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|r| r.flat_id() == &flat_a));
    }

    #[tokio::test]
    async fn list_all_returns_every_record() {
        let repo = InMemoryVisitorRepository::new();
        repo.insert(&request_for(FlatId::new(), "Sam")).await.unwrap();
        repo.insert(&request_for(FlatId::new(), "Alex")).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }
}
