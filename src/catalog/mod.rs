//! Catalog Module
//!
//! Cache-aside orchestration of the Store and the item cache.

mod service;

pub use service::CatalogService;
