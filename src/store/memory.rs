//! In-memory Store backend, used when no database path is configured.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{Item, ItemDraft, ItemId, ItemPatch};

#[derive(Debug, Default)]
struct Records {
    items: BTreeMap<ItemId, Item>,
    last_id: ItemId,
}

/// Process-local Store keeping records in id order.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn create(&self, draft: ItemDraft) -> StoreResult<Item> {
        let mut records = self.records.write();
        records.last_id += 1;
        let item = Item::from_draft(records.last_id, draft, Utc::now());
        records.items.insert(item.id, item.clone());
        Ok(item)
    }

    fn read(&self, id: ItemId) -> StoreResult<Option<Item>> {
        Ok(self.records.read().items.get(&id).cloned())
    }

    fn replace(&self, id: ItemId, patch: &ItemPatch) -> StoreResult<Item> {
        let mut records = self.records.write();
        let item = records.items.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.apply(patch);
        Ok(item.clone())
    }

    fn delete(&self, id: ItemId) -> StoreResult<()> {
        self.records
            .write()
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    fn list(&self, category: Option<&str>) -> StoreResult<Vec<Item>> {
        let records = self.records.read();
        Ok(records
            .items
            .values()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .cloned()
            .collect())
    }
}
