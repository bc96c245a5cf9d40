//! API Handlers
//!
//! HTTP request handlers for each document cache endpoint. Bodies are
//! validated before the service is called, so malformed requests never reach
//! the cache or the store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{
    ClearResponse, DocumentDescriptor, DocumentResponse, HealthResponse, QueryRequest,
    QueryResponse, StatsResponse, WriteRequest, WriteResponse,
};
use crate::service::DocumentService;
use crate::store::DocumentStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-fronted document access
    pub service: DocumentService<dyn DocumentStore>,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: DocumentService<dyn DocumentStore>) -> Self {
        Self { service }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache is sized and its TTL set from the Config.
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self::new(DocumentService::from_config(store, config))
    }
}

/// Handler for PUT /documents
///
/// Writes a document to the store and caches it.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<WriteResponse>> {
    let (descriptor, document) = req.validate()?;

    state.service.create(&descriptor, document).await?;

    Ok(Json(WriteResponse::new(descriptor)))
}

/// Handler for GET /documents/:collection/:id
///
/// Reads one document, from the cache when possible.
pub async fn read_one_handler(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<DocumentResponse>> {
    let descriptor = DocumentDescriptor::new(collection, id);
    let document = state.service.read_one(&descriptor).await?;

    Ok(Json(DocumentResponse::new(descriptor, document)))
}

/// Handler for PATCH /documents
///
/// Applies a partial update and returns the refreshed document.
pub async fn update_handler(
    State(state): State<AppState>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<DocumentResponse>> {
    let (descriptor, partial) = req.validate()?;

    let document = state.service.update_one(&descriptor, partial).await?;

    Ok(Json(DocumentResponse::new(descriptor, document)))
}

/// Handler for POST /documents/query
///
/// Runs a filtered query, from the cache when possible.
pub async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let (query, filters) = req.validate()?;

    let documents = state.service.read_many(&query, &filters).await?;

    Ok(Json(QueryResponse::new(query.collection, documents)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.service.clear_cache().await;
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache().read().await;
    Json(StatsResponse::new(
        &cache.stats(),
        cache.size_bytes(),
        cache.max_bytes(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocCacheError;
    use crate::store::MemoryDocumentStore;
    use serde_json::json;

    fn state_with_store() -> (AppState, Arc<MemoryDocumentStore>) {
        let store = Arc::new(MemoryDocumentStore::new());
        let state = AppState::from_config(store.clone(), &Config::default());
        (state, store)
    }

    fn write_request(body: serde_json::Value) -> WriteRequest {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_read_handler() {
        let (state, store) = state_with_store();

        let req = write_request(json!({
            "collection": "tasks",
            "id": "1",
            "document": {"title": "a"}
        }));
        create_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = read_one_handler(
            State(state),
            Path(("tasks".to_string(), "1".to_string())),
        )
        .await
        .unwrap();

        assert_eq!(response.document["title"], "a");
        assert_eq!(store.calls().get, 0);
    }

    #[tokio::test]
    async fn test_create_with_numeric_collection_is_rejected() {
        let (state, store) = state_with_store();

        let req = write_request(json!({"collection": 123, "id": "a", "document": {}}));
        let result = create_handler(State(state.clone()), Json(req)).await;

        assert!(matches!(result, Err(DocCacheError::Validation(_))));
        assert_eq!(store.calls().total(), 0);
        let stats = state.service.cache_stats().await;
        assert_eq!(stats.hits + stats.misses, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_read_missing_document() {
        let (state, _) = state_with_store();

        let result = read_one_handler(
            State(state),
            Path(("tasks".to_string(), "nope".to_string())),
        )
        .await;
        assert!(matches!(result, Err(DocCacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let (state, _) = state_with_store();
        let req = write_request(json!({
            "collection": "tasks",
            "id": "1",
            "document": {"title": "a"}
        }));
        create_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = clear_handler(State(state)).await;
        assert_eq!(response.cleared, 1);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _) = state_with_store();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.max_bytes, 64 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
