//! Insertion Order Module
//!
//! Tracks the order in which ids were (re)inserted, for capacity eviction.

use std::collections::VecDeque;

use crate::models::ItemId;

// == Insertion Order ==
/// Queue of cached ids ordered by insertion time.
///
/// - Front = oldest insertion (next to evict)
/// - Back = newest insertion
///
/// Reads never reorder the queue; only a fresh insertion moves an id to
/// the back.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<ItemId>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Marks `id` as the newest insertion.
    pub fn record(&mut self, id: ItemId) {
        self.remove(id);
        self.order.push_back(id);
    }

    // == Remove ==
    /// Forgets `id`; no-op if it is not tracked.
    pub fn remove(&mut self, id: ItemId) {
        self.order.retain(|tracked| *tracked != id);
    }

    // == Pop Oldest ==
    /// Returns and removes the least recently inserted id.
    pub fn pop_oldest(&mut self) -> Option<ItemId> {
        self.order.pop_front()
    }

    /// Returns the least recently inserted id without removing it.
    pub fn peek_oldest(&self) -> Option<ItemId> {
        self.order.front().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.order.contains(&id)
    }
}
