//! Widget Cache - a warehouse catalog with a cache-aside item cache
//!
//! Widgets live in a durable Store; point lookups are accelerated by a
//! bounded, time-expiring in-memory cache kept consistent by the catalog.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::ItemCache;
pub use catalog::CatalogService;
pub use config::Config;
pub use error::{CatalogError, Result};
pub use tasks::spawn_cleanup_task;
