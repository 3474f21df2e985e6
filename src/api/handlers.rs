//! API Handlers
//!
//! HTTP request handlers translating requests into catalog calls.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::cache::ItemCache;
use crate::catalog::CatalogService;
use crate::config::Config;
use crate::error::{ApiError, ApiResult, Result};
use crate::models::{
    CategorySummary, DeleteResponse, HealthResponse, Item, ItemDraft, ItemId, ItemPatch,
    StatsResponse,
};
use crate::store::{MemoryStore, SqliteStore, Store, StoreError};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside catalog over the configured Store
    pub catalog: CatalogService,
}

impl AppState {
    /// Creates a new AppState around an already composed catalog.
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Builds the Store and cache described by the configuration.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StoreError> {
        let store: Arc<dyn Store> = match &config.database_path {
            Some(path) => Arc::new(SqliteStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        let cache = Arc::new(ItemCache::new(config.max_entries, config.ttl()));
        Ok(Self::new(CatalogService::new(store, cache)))
    }

    /// The cache owned by this state's catalog.
    pub fn cache(&self) -> Arc<ItemCache> {
        Arc::clone(self.catalog.cache())
    }
}

/// Runs a synchronous catalog call on the blocking pool.
async fn run_catalog<T, F>(state: AppState, call: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&CatalogService) -> Result<T> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || call(&state.catalog))
        .await
        .map_err(|e| ApiError::Internal(format!("catalog task failed: {}", e)))?;
    Ok(outcome?)
}

/// Query string for GET /widgets
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Handler for GET /widgets
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = run_catalog(state, move |catalog| catalog.list(query.category.as_deref())).await?;
    Ok(Json(items))
}

/// Handler for GET /widgets/:id
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> ApiResult<Json<Item>> {
    let item = run_catalog(state, move |catalog| catalog.get(id)).await?;
    Ok(Json(item))
}

/// Handler for POST /widgets
pub async fn create_handler(
    State(state): State<AppState>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<Json<Item>> {
    let item = run_catalog(state, move |catalog| catalog.create(draft)).await?;
    Ok(Json(item))
}

/// Handler for PUT /widgets/:id
pub async fn replace_handler(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<Json<Item>> {
    let item = run_catalog(state, move |catalog| catalog.replace(id, draft)).await?;
    Ok(Json(item))
}

/// Handler for PATCH /widgets/:id
pub async fn patch_handler(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(patch): Json<ItemPatch>,
) -> ApiResult<Json<Item>> {
    let item = run_catalog(state, move |catalog| catalog.partial_replace(id, patch)).await?;
    Ok(Json(item))
}

/// Handler for DELETE /widgets/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> ApiResult<Json<DeleteResponse>> {
    run_catalog(state, move |catalog| catalog.delete(id)).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /widgets/info/:category
pub async fn category_total_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<CategorySummary>> {
    let summary = run_catalog(state, move |catalog| catalog.category_total(&category)).await?;
    Ok(Json(summary))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.catalog.cache().stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
