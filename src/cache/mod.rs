//! Cache Module
//!
//! Provides the bounded, time-expiring item snapshot cache that sits in
//! front of the Store.

mod entry;
mod item_cache;
mod order;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use item_cache::{ItemCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use order::InsertionOrder;
pub use stats::CacheStats;
