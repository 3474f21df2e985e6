//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    category_total_handler, create_handler, delete_handler, get_handler, health_handler,
    list_handler, patch_handler, replace_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /widgets[?category=C]` - List widgets
/// - `POST /widgets` - Create a widget
/// - `GET /widgets/:id` - Fetch a widget (cache-aside)
/// - `PUT /widgets/:id` - Replace every field of a widget
/// - `PATCH /widgets/:id` - Replace the given fields of a widget
/// - `DELETE /widgets/:id` - Delete a widget
/// - `GET /widgets/info/:category` - Count and price total of a category
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/widgets", get(list_handler).post(create_handler))
        .route(
            "/widgets/:id",
            get(get_handler)
                .put(replace_handler)
                .patch(patch_handler)
                .delete(delete_handler),
        )
        .route("/widgets/info/:category", get(category_total_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
