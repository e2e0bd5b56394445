//! In-memory flat directory.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, FlatId};
use crate::ports::{FlatDirectory, FlatRecord};

/// In-memory implementation of [`FlatDirectory`].
pub struct InMemoryFlatDirectory {
    flats: RwLock<HashMap<FlatId, FlatRecord>>,
}

impl InMemoryFlatDirectory {
    pub fn new() -> Self {
        Self {
            flats: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFlatDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlatDirectory for InMemoryFlatDirectory {
    async fn register(&self, record: FlatRecord) -> Result<(), DomainError> {
        self.flats.write().await.insert(record.id, record);
        Ok(())
    }

    async fn lookup(&self, flat_id: &FlatId) -> Result<Option<FlatRecord>, DomainError> {
        Ok(self.flats.read().await.get(flat_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<FlatRecord>, DomainError> {
        let mut flats: Vec<FlatRecord> = self.flats.read().await.values().cloned().collect();
        flats.sort_by(|a, b| a.label().cmp(&b.label()));
        Ok(flats)
    }
}
