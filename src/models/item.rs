//! Item Model
//!
//! The authoritative catalog record and its derived category aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ItemDraft, ItemPatch};

/// Store-assigned identifier of a catalog item.
pub type ItemId = u64;

// == Item ==
/// A widget held in the warehouse catalog.
///
/// The Store owns the authoritative record; the cache only ever holds
/// clones of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned, immutable identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Category the item is filed under (compared case-sensitively)
    pub category: String,
    /// Unit price, never negative
    pub price: f64,
    /// Creation timestamp, assigned by the Store
    pub created_at: DateTime<Utc>,
}

impl Item {
    // == Constructor ==
    /// Builds a freshly stored item from a draft.
    pub fn from_draft(id: ItemId, draft: ItemDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            price: draft.price,
            created_at,
        }
    }

    // == Apply Patch ==
    /// Overwrites the fields present in `patch`, keeping the rest.
    ///
    /// Identifier and creation timestamp are never touched.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

// == Category Summary ==
/// Count and price total of every item currently in one category.
///
/// Recomputed from the Store on each request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_price: f64,
    pub number_of_items: usize,
}

impl CategorySummary {
    /// Folds a category listing into its aggregate.
    pub fn from_items(category: impl Into<String>, items: &[Item]) -> Self {
        Self {
            category: category.into(),
            total_price: items.iter().map(|item| item.price).sum(),
            number_of_items: items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        Item::from_draft(
            1,
            ItemDraft::new("A", "Tools", 5.0),
            Utc::now(),
        )
    }

    #[test]
    fn test_apply_partial_patch_keeps_absent_fields() {
        let mut item = sample();
        let created_at = item.created_at;

        item.apply(&ItemPatch {
            price: Some(7.5),
            ..ItemPatch::default()
        });

        assert_eq!(item.id, 1);
        assert_eq!(item.name, "A");
        assert_eq!(item.category, "Tools");
        assert_eq!(item.price, 7.5);
        assert_eq!(item.created_at, created_at);
    }

    #[test]
    fn test_apply_full_patch() {
        let mut item = sample();
        item.apply(&ItemPatch::from(ItemDraft::new("B", "Garden", 1.25)));

        assert_eq!(item.name, "B");
        assert_eq!(item.category, "Garden");
        assert_eq!(item.price, 1.25);
    }

    #[test]
    fn test_category_summary_sums_prices() {
        let mut second = sample();
        second.id = 2;
        second.price = 7.5;

        let summary = CategorySummary::from_items("Tools", &[sample(), second]);
        assert_eq!(summary.number_of_items, 2);
        assert_eq!(summary.total_price, 12.5);
    }

    #[test]
    fn test_category_summary_empty() {
        let summary = CategorySummary::from_items("Empty", &[]);
        assert_eq!(summary.category, "Empty");
        assert_eq!(summary.number_of_items, 0);
        assert_eq!(summary.total_price, 0.0);
    }

    #[test]
    fn test_item_serializes_rfc3339_timestamp() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["name"], "A");
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }
}
