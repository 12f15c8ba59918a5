use serde::{Deserialize, Serialize};

use crate::object_id::ObjectId;

/// Raw outcome of a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub modified_count: u64,
    pub upserted_id: Option<ObjectId>,
    pub upserted_count: u64,
    pub matched_count: u64,
}

impl UpdateResult {
    #[must_use]
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
            matched_count: 0,
        }
    }

    #[must_use]
    pub fn matched(modified: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(modified),
            ..Self::unmatched()
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched_count > 0
    }
}

/// Raw outcome of a single-document delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    #[must_use]
    pub fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count,
        }
    }
}
