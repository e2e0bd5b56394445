//! FlatDirectory port - Interface to the flat registry.
//!
//! The registry that maps flat identifiers to their display coordinates
//! (block + number). The coordination core consults it to resolve the flat
//! label carried in created-event payloads; registration exists so the
//! plumbing around the core can seed it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, FlatId};

/// A flat as known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: FlatId,
    pub block: String,
    pub number: String,
}

impl FlatRecord {
    /// Display label for notifications, e.g. "B-204".
    pub fn label(&self) -> String {
        format!("{}-{}", self.block, self.number)
    }
}

/// Port for flat lookups and registration.
#[async_trait]
pub trait FlatDirectory: Send + Sync {
    /// Register or replace a flat record.
    async fn register(&self, record: FlatRecord) -> Result<(), DomainError>;

    /// Look up a flat by id; `None` when unknown.
    async fn lookup(&self, flat_id: &FlatId) -> Result<Option<FlatRecord>, DomainError>;

    /// All registered flats.
    async fn list_all(&self) -> Result<Vec<FlatRecord>, DomainError>;
}
