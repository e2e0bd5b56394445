//! HTTP DTOs for flat directory endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::FlatRecord;

/// Request to register a flat in the directory.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterFlatRequest {
    pub block: String,
    pub number: String,
}

/// Flat view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct FlatResponse {
    pub id: String,
    pub block: String,
    pub number: String,
    pub label: String,
}

impl From<&FlatRecord> for FlatResponse {
    fn from(record: &FlatRecord) -> Self {
        Self {
            id: record.id.to_string(),
            block: record.block.clone(),
            number: record.number.clone(),
            label: record.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FlatId;

    #[test]
    fn flat_response_includes_label() {
        let record = FlatRecord {
            id: FlatId::new(),
            block: "B".to_string(),
            number: "204".to_string(),
        };
        let view = FlatResponse::from(&record);
        assert_eq!(view.label, "B-204");
    }
}
