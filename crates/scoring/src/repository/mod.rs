pub mod memory;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Result;
use crate::models::CategoryScore;

pub use memory::InMemoryEntryRepository;

/// Storage the bulk recompute reads ratings from and writes scores to.
///
/// Implementations return [`crate::ScoringError::NotFound`] for ids that no
/// longer exist; the recompute skips those and keeps going.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn list_entry_ids(&self) -> Result<Vec<Uuid>>;

    async fn load_ratings(&self, entry_id: Uuid) -> Result<Vec<CategoryScore>>;

    /// Returns the score that was stored before the update.
    async fn update_composite_score(
        &self,
        entry_id: Uuid,
        composite_score: Decimal,
    ) -> Result<Option<Decimal>>;
}
