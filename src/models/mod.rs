//! Catalog data types and API DTOs
//!
//! Items and their derived aggregates, the drafts and patches callers send,
//! and the bodies the HTTP layer returns.

pub mod item;
pub mod requests;
pub mod responses;
pub mod validation;

// Re-export commonly used types
pub use item::{CategorySummary, Item, ItemId};
pub use requests::{ItemDraft, ItemPatch};
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, StatsResponse};
pub use validation::{FieldViolation, ValidationError};
