//! Store Module
//!
//! The durable record storage the catalog sits on. The catalog only relies
//! on the [`Store`] contract; backends decide how records are kept.

mod memory;
mod sqlite;

use thiserror::Error;

use crate::models::{Item, ItemDraft, ItemId, ItemPatch};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

// == Store Error ==
/// Failures reported by a Store backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No record exists for the id
    #[error("Widget not found: {0}")]
    NotFound(ItemId),

    /// The backend could not complete the call
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience Result type for Store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Store Contract ==
/// Durable keyed item storage.
///
/// Each call is atomic on its own; callers never compose several calls
/// into one transaction.
pub trait Store: Send + Sync {
    /// Persists a new record, assigning its id and creation timestamp.
    fn create(&self, draft: ItemDraft) -> StoreResult<Item>;

    /// Fetches the record for `id`, if any.
    fn read(&self, id: ItemId) -> StoreResult<Option<Item>>;

    /// Applies the fields present in `patch` to an existing record and
    /// returns the updated record. Fails with `NotFound` if `id` is absent.
    fn replace(&self, id: ItemId, patch: &ItemPatch) -> StoreResult<Item>;

    /// Removes the record for `id`. Fails with `NotFound` if `id` is absent.
    fn delete(&self, id: ItemId) -> StoreResult<()>;

    /// Lists every record, or only those whose category equals `category`.
    /// Results are ordered by id.
    fn list(&self, category: Option<&str>) -> StoreResult<Vec<Item>>;
}
