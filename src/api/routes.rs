//! API Routes
//!
//! Configures the Axum router with all document cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, create_handler, health_handler, query_handler, read_one_handler,
    stats_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /documents` - Create a document
/// - `PATCH /documents` - Update a document
/// - `GET /documents/:collection/:id` - Read one document
/// - `POST /documents/query` - Read many documents
/// - `DELETE /cache` - Clear the cache
/// - `GET /stats` - Get cache statistics
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
        .route("/documents", put(create_handler).patch(update_handler))
        .route("/documents/query", post(query_handler))
        .route("/documents/:collection/:id", get(read_one_handler))
        .route("/cache", delete(clear_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
