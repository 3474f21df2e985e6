//! API Module
//!
//! HTTP handlers and routing for the widget catalog REST API.
//!
//! # Endpoints
//! - `GET /widgets` / `POST /widgets` - List or create widgets
//! - `GET|PUT|PATCH|DELETE /widgets/:id` - Single widget operations
//! - `GET /widgets/info/:category` - Category totals
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
