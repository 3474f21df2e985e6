//! Cache Entry Module
//!
//! Defines a single cached item snapshot with its expiry deadline.

use std::time::{Duration, Instant};

use crate::models::Item;

// == Cache Entry ==
/// A snapshot of a Store record plus the moment it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached snapshot
    pub item: Item,
    /// When the snapshot was inserted
    pub inserted_at: Instant,
    /// Expiration deadline, None = the TTL overflowed the clock
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` after now.
    pub fn new(item: Item, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            item,
            inserted_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline, so a
    /// zero TTL produces an entry that is never served.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a fixed instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDraft;
    use chrono::Utc;
    use std::thread::sleep;

    fn item() -> Item {
        Item::from_draft(1, ItemDraft::new("A", "Tools", 5.0), Utc::now())
    }

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(item(), Duration::from_secs(60));

        assert_eq!(entry.item.id, 1);
        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(item(), Duration::from_millis(50));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new(item(), Duration::from_secs(10));

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new(item(), Duration::ZERO);
        assert!(entry.is_expired_at(entry.inserted_at));
    }

    #[test]
    fn test_overflowing_ttl_never_expires() {
        let entry = CacheEntry::new(item(), Duration::MAX);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining().is_none());
    }
}
