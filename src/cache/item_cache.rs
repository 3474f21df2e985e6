//! Item Cache Module
//!
//! Bounded, expiring snapshot cache keyed by item id. Combines HashMap
//! storage with insertion-order eviction and write-time TTL expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};
use crate::models::{Item, ItemId};

/// Capacity used when none is configured
pub const DEFAULT_MAX_ENTRIES: usize = 10;

/// Expiry used when none is configured
pub const DEFAULT_TTL: Duration = Duration::from_secs(200);

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<ItemId, CacheEntry>,
    order: InsertionOrder,
    stats: CacheStats,
}

impl CacheState {
    fn remove(&mut self, id: ItemId) -> Option<CacheEntry> {
        let removed = self.entries.remove(&id);
        if removed.is_some() {
            self.order.remove(id);
        }
        removed
    }
}

// == Item Cache ==
/// Thread-safe cache holding at most `max_entries` item snapshots, each
/// served for at most `ttl` after it was put.
///
/// Every operation runs under one lock, so a `get` racing a `put` or
/// `invalidate` on the same id sees either the old or the new state.
#[derive(Debug)]
pub struct ItemCache {
    state: Mutex<CacheState>,
    max_entries: usize,
    ttl: Duration,
}

impl ItemCache {
    // == Constructor ==
    /// Creates a new cache with the given capacity and expiry.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            max_entries,
            ttl,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns the snapshot for `id` if present and not expired.
    ///
    /// A hit does not extend the entry's lifetime or its eviction rank.
    /// Expired entries are dropped on the spot and reported as absent.
    pub fn get(&self, id: ItemId) -> Option<Item> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let expired = match state.entries.get(&id) {
            Some(entry) if !entry.is_expired() => {
                let item = entry.item.clone();
                state.stats.record_hit();
                return Some(item);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.remove(id);
            state.stats.record_expirations(1);
            debug!(id, "cache entry expired");
        }
        state.stats.record_miss();
        None
    }

    // == Put ==
    /// Inserts or replaces the snapshot for `id`, restarting its expiry
    /// clock and making it the newest insertion.
    ///
    /// When a new id would exceed capacity, the oldest insertions are
    /// evicted first, whether or not they have expired yet.
    pub fn put(&self, id: ItemId, item: Item) {
        if self.max_entries == 0 {
            return;
        }

        let mut state = self.state.lock();

        if !state.entries.contains_key(&id) {
            while state.entries.len() >= self.max_entries {
                let Some(oldest) = state.order.pop_oldest() else {
                    break;
                };
                state.entries.remove(&oldest);
                state.stats.record_eviction();
                debug!(evicted = oldest, "cache at capacity, evicted oldest entry");
            }
        }

        state.entries.insert(id, CacheEntry::new(item, self.ttl));
        state.order.record(id);
    }

    // == Invalidate ==
    /// Removes the entry for `id`. Returns whether anything was removed;
    /// invalidating an absent id has no other effect.
    pub fn invalidate(&self, id: ItemId) -> bool {
        self.state.lock().remove(id).is_some()
    }

    // == Purge Expired ==
    /// Removes every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let now = Instant::now();

        let expired: Vec<ItemId> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired {
            state.remove(*id);
        }
        state.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Drops every entry. Statistics are kept.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.order = InsertionOrder::new();
    }
}

impl Default for ItemCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDraft;
    use chrono::Utc;
    use std::sync::Arc;
    use std::thread;
    use std::thread::sleep;

    fn item(id: ItemId, price: f64) -> Item {
        Item::from_draft(id, ItemDraft::new(format!("widget-{id}"), "Tools", price), Utc::now())
    }

    fn cache(max_entries: usize) -> ItemCache {
        ItemCache::new(max_entries, Duration::from_secs(300))
    }

    #[test]
    fn test_cache_new() {
        let cache = cache(10);
        assert!(cache.is_empty());
        assert_eq!(cache.max_entries(), 10);
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_default_matches_operational_values() {
        let cache = ItemCache::default();
        assert_eq!(cache.max_entries(), 10);
        assert_eq!(cache.ttl(), Duration::from_secs(200));
    }

    #[test]
    fn test_put_and_get() {
        let cache = cache(10);

        let stored = item(1, 5.0);
        cache.put(1, stored.clone());

        assert_eq!(cache.get(1), Some(stored));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_absent() {
        let cache = cache(10);
        assert!(cache.get(42).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_put_overwrites() {
        let cache = cache(10);

        cache.put(1, item(1, 5.0));
        cache.put(1, item(1, 7.5));

        assert_eq!(cache.get(1).unwrap().price, 7.5);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate() {
        let cache = cache(10);

        cache.put(1, item(1, 5.0));
        assert!(cache.invalidate(1));

        assert!(cache.get(1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_absent_is_noop() {
        let cache = cache(10);
        cache.put(1, item(1, 5.0));

        assert!(!cache.invalidate(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), {
            let mut expected = CacheStats::new();
            expected.set_total_entries(1);
            expected
        });
    }

    #[test]
    fn test_evicts_oldest_insertion() {
        let cache = cache(3);

        cache.put(1, item(1, 1.0));
        cache.put(2, item(2, 2.0));
        cache.put(3, item(3, 3.0));
        cache.put(4, item(4, 4.0));

        assert_eq!(cache.len(), 3);
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());
        assert!(cache.get(3).is_some());
        assert!(cache.get(4).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_get_does_not_refresh_eviction_rank() {
        let cache = cache(3);

        cache.put(1, item(1, 1.0));
        cache.put(2, item(2, 2.0));
        cache.put(3, item(3, 3.0));

        // Reading 1 must not save it from eviction
        assert!(cache.get(1).is_some());
        cache.put(4, item(4, 4.0));

        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_some());
    }

    #[test]
    fn test_reput_counts_as_newest_insertion() {
        let cache = cache(3);

        cache.put(1, item(1, 1.0));
        cache.put(2, item(2, 2.0));
        cache.put(3, item(3, 3.0));
        cache.put(1, item(1, 1.5));
        cache.put(4, item(4, 4.0));

        assert_eq!(cache.get(1).unwrap().price, 1.5);
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let cache = cache(0);
        cache.put(1, item(1, 1.0));
        assert!(cache.is_empty());
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = ItemCache::new(10, Duration::from_millis(50));

        cache.put(1, item(1, 5.0));
        assert!(cache.get(1).is_some());

        sleep(Duration::from_millis(80));

        assert!(cache.get(1).is_none());
        let stats = cache.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_get_does_not_extend_lifetime() {
        let cache = ItemCache::new(10, Duration::from_millis(100));

        cache.put(1, item(1, 5.0));
        sleep(Duration::from_millis(60));
        assert!(cache.get(1).is_some());
        sleep(Duration::from_millis(60));

        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_reput_resets_expiry() {
        let cache = ItemCache::new(10, Duration::from_millis(100));

        cache.put(1, item(1, 5.0));
        sleep(Duration::from_millis(60));
        cache.put(1, item(1, 6.0));
        sleep(Duration::from_millis(60));

        assert_eq!(cache.get(1).unwrap().price, 6.0);
    }

    #[test]
    fn test_purge_expired() {
        let cache = ItemCache::new(10, Duration::from_millis(50));

        cache.put(1, item(1, 1.0));
        cache.put(2, item(2, 2.0));
        sleep(Duration::from_millis(80));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_clear_keeps_stats() {
        let cache = cache(10);
        cache.put(1, item(1, 1.0));
        cache.get(1);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_concurrent_access_respects_capacity() {
        let cache = Arc::new(cache(10));

        let handles: Vec<_> = (0..8u64)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..200u64 {
                        let id = (t * 1000 + i) % 37;
                        match i % 3 {
                            0 => cache.put(id, item(id, i as f64)),
                            1 => {
                                if let Some(found) = cache.get(id) {
                                    assert_eq!(found.id, id);
                                }
                            }
                            _ => {
                                cache.invalidate(id);
                            }
                        }
                        assert!(cache.len() <= 10);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 10);
    }
}
