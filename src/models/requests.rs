//! Request DTOs for the catalog API
//!
//! Drafts for create/replace and patches for partial updates, together
//! with the field constraints checked before any Store write.

use serde::Deserialize;

use crate::models::{FieldViolation, ValidationError};

/// Full set of caller-supplied item fields (POST and PUT bodies).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl ItemDraft {
    /// Creates a new ItemDraft
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
        }
    }

    /// Checks every field constraint, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        check_text("name", &self.name, &mut violations);
        check_text("category", &self.category, &mut violations);
        check_price(self.price, &mut violations);
        ValidationError::from_violations(violations)
    }
}

/// Partial update body (PATCH). Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ItemPatch {
    /// Checks the constraints of the fields that are present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();
        if let Some(name) = &self.name {
            check_text("name", name, &mut violations);
        }
        if let Some(category) = &self.category {
            check_text("category", category, &mut violations);
        }
        if let Some(price) = self.price {
            check_price(price, &mut violations);
        }
        ValidationError::from_violations(violations)
    }

    /// Returns true if no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.price.is_none()
    }
}

impl From<ItemDraft> for ItemPatch {
    fn from(draft: ItemDraft) -> Self {
        Self {
            name: Some(draft.name),
            category: Some(draft.category),
            price: Some(draft.price),
        }
    }
}

fn check_text(field: &'static str, value: &str, violations: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "must not be blank"));
    }
}

fn check_price(price: f64, violations: &mut Vec<FieldViolation>) {
    if !price.is_finite() {
        violations.push(FieldViolation::new("price", "must be a finite number"));
    } else if price < 0.0 {
        violations.push(FieldViolation::new("price", "must be greater than or equal to 0"));
    }
}
