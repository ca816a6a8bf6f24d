use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::EntryRepository;
use crate::error::{Result, ScoringError};
use crate::models::{CategoryScore, Entry};

/// Entries held in memory, keyed by id. Listing order follows insertion.
#[derive(Debug, Default)]
pub struct InMemoryEntryRepository {
    entries: RwLock<HashMap<Uuid, Entry>>,
    order: RwLock<Vec<Uuid>>,
}

impl InMemoryEntryRepository {
    pub fn new(entries: Vec<Entry>) -> Self {
        let order = entries.iter().map(|e| e.entry_id).collect();
        let entries = entries.into_iter().map(|e| (e.entry_id, e)).collect();

        Self {
            entries: RwLock::new(entries),
            order: RwLock::new(order),
        }
    }

    pub async fn insert(&self, entry: Entry) {
        let entry_id = entry.entry_id;
        let mut entries = self.entries.write().await;
        if entries.insert(entry_id, entry).is_none() {
            self.order.write().await.push(entry_id);
        }
    }

    pub async fn remove(&self, entry_id: Uuid) -> Result<Entry> {
        let removed = self
            .entries
            .write()
            .await
            .remove(&entry_id)
            .ok_or_else(|| not_found(entry_id))?;
        self.order.write().await.retain(|id| *id != entry_id);
        Ok(removed)
    }

    pub async fn get(&self, entry_id: Uuid) -> Result<Entry> {
        self.entries
            .read()
            .await
            .get(&entry_id)
            .cloned()
            .ok_or_else(|| not_found(entry_id))
    }

    /// All entries in insertion order.
    pub async fn snapshot(&self) -> Vec<Entry> {
        let entries = self.entries.read().await;
        self.order
            .read()
            .await
            .iter()
            .filter_map(|id| entries.get(id).cloned())
            .collect()
    }
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn list_entry_ids(&self) -> Result<Vec<Uuid>> {
        Ok(self.order.read().await.clone())
    }

    async fn load_ratings(&self, entry_id: Uuid) -> Result<Vec<CategoryScore>> {
        self.entries
            .read()
            .await
            .get(&entry_id)
            .map(|e| e.ratings.clone())
            .ok_or_else(|| not_found(entry_id))
    }

    async fn update_composite_score(
        &self,
        entry_id: Uuid,
        composite_score: Decimal,
    ) -> Result<Option<Decimal>> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&entry_id).ok_or_else(|| not_found(entry_id))?;
        Ok(entry.composite_score.replace(composite_score))
    }
}

fn not_found(entry_id: Uuid) -> ScoringError {
    ScoringError::NotFound(format!("entry {}", entry_id))
}
