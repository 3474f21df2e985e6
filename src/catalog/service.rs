//! Catalog Service
//!
//! Every item lookup or mutation goes through here so the cache never
//! drifts from the Store beyond its own expiry window.
//!
//! Write paths always finish the Store call before touching the cache.
//! Nothing links the two steps under one lock: two writers racing on the
//! same id may leave the cache holding the older write until it expires.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::ItemCache;
use crate::error::{CatalogError, Result};
use crate::models::{CategorySummary, Item, ItemDraft, ItemId, ItemPatch};
use crate::store::Store;

// == Catalog Service ==
/// Cache-aside front for a [`Store`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
    cache: Arc<ItemCache>,
}

impl CatalogService {
    // == Constructor ==
    /// Composes a service from a Store and the cache it should keep.
    pub fn new(store: Arc<dyn Store>, cache: Arc<ItemCache>) -> Self {
        Self { store, cache }
    }

    /// The cache this service populates.
    pub fn cache(&self) -> &Arc<ItemCache> {
        &self.cache
    }

    // == Create ==
    /// Validates and persists a new item, then caches it.
    pub fn create(&self, draft: ItemDraft) -> Result<Item> {
        draft.validate()?;

        let item = self.store.create(draft).map_err(store_failure)?;
        self.cache.put(item.id, item.clone());

        info!(id = item.id, category = %item.category, "widget created");
        Ok(item)
    }

    // == Read ==
    /// Returns the item for `id`, answering from the cache when possible.
    ///
    /// On a miss the Store is consulted and a found item is cached. A
    /// missing item is not cached, and a Store failure is never papered
    /// over with cached data.
    pub fn get(&self, id: ItemId) -> Result<Item> {
        if let Some(item) = self.cache.get(id) {
            debug!(id, "cache hit");
            return Ok(item);
        }
        debug!(id, "cache miss");

        let item = self
            .store
            .read(id)
            .map_err(store_failure)?
            .ok_or(CatalogError::NotFound(id))?;
        self.cache.put(id, item.clone());
        Ok(item)
    }

    // == List ==
    /// Lists items straight from the Store, optionally restricted to an
    /// exact (case-sensitive) category.
    pub fn list(&self, category: Option<&str>) -> Result<Vec<Item>> {
        self.store.list(category).map_err(store_failure)
    }

    // == Replace ==
    /// Overwrites every field of an existing item and refreshes its cache
    /// entry with the result.
    pub fn replace(&self, id: ItemId, draft: ItemDraft) -> Result<Item> {
        draft.validate()?;
        self.write_through(id, &ItemPatch::from(draft))
    }

    // == Partial Replace ==
    /// Overwrites only the fields present in `patch`.
    pub fn partial_replace(&self, id: ItemId, patch: ItemPatch) -> Result<Item> {
        patch.validate()?;
        self.write_through(id, &patch)
    }

    // == Delete ==
    /// Removes an item from the Store, then drops its cache entry.
    pub fn delete(&self, id: ItemId) -> Result<()> {
        self.ensure_stored(id)?;

        self.store.delete(id).map_err(store_failure)?;
        self.cache.invalidate(id);

        info!(id, "widget deleted");
        Ok(())
    }

    // == Category Total ==
    /// Counts the items in `category` and sums their prices. Always
    /// computed from the Store.
    pub fn category_total(&self, category: &str) -> Result<CategorySummary> {
        let items = self.list(Some(category))?;
        Ok(CategorySummary::from_items(category, &items))
    }

    fn write_through(&self, id: ItemId, patch: &ItemPatch) -> Result<Item> {
        self.ensure_stored(id)?;

        let item = self.store.replace(id, patch).map_err(store_failure)?;
        self.cache.put(id, item.clone());

        info!(id, "widget updated");
        Ok(item)
    }

    /// Existence checks on write paths go to the Store, never the cache.
    fn ensure_stored(&self, id: ItemId) -> Result<()> {
        match self.store.read(id).map_err(store_failure)? {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound(id)),
        }
    }
}

fn store_failure(err: crate::store::StoreError) -> CatalogError {
    let err = CatalogError::from(err);
    if let CatalogError::StoreUnavailable(reason) = &err {
        warn!("store call failed: {}", reason);
    }
    err
}
