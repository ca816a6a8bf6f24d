use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Outcome of a bulk score recompute.
///
/// `skipped` entries disappeared between listing and updating. `failed`
/// entries hit a storage error and can be retried individually.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecomputeReport {
    pub updated: u64,
    pub unchanged: u64,
    pub skipped: Vec<Uuid>,
    pub failed: Vec<Uuid>,
}

impl RecomputeReport {
    pub fn processed(&self) -> u64 {
        self.updated + self.unchanged
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}
