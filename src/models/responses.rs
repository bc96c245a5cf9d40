//! Response DTOs for the document cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::{Document, DocumentDescriptor};

/// Response body for create (PUT /documents)
#[derive(Debug, Clone, Serialize)]
pub struct WriteResponse {
    /// Success message
    pub message: String,
    pub collection: String,
    pub id: String,
}

impl WriteResponse {
    pub fn new(descriptor: DocumentDescriptor) -> Self {
        Self {
            message: format!(
                "Document '{}/{}' written successfully",
                descriptor.collection, descriptor.id
            ),
            collection: descriptor.collection,
            id: descriptor.id,
        }
    }
}

/// Response body for read-one (GET /documents/:collection/:id) and update
/// (PATCH /documents)
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub collection: String,
    pub id: String,
    pub document: Document,
}

impl DocumentResponse {
    pub fn new(descriptor: DocumentDescriptor, document: Document) -> Self {
        Self {
            collection: descriptor.collection,
            id: descriptor.id,
            document,
        }
    }
}

/// Response body for read-many (POST /documents/query)
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub collection: String,
    /// Number of documents returned
    pub count: usize,
    pub documents: Vec<Document>,
}

impl QueryResponse {
    pub fn new(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            collection: collection.into(),
            count: documents.len(),
            documents,
        }
    }
}

/// Response body for the cache clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Number of entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cache cleared, {} entries removed", cleared),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    /// Number of full flushes triggered by the byte budget
    pub flushes: u64,
    pub total_entries: usize,
    /// Current serialized size of the cache
    pub size_bytes: u64,
    /// Configured byte budget
    pub max_bytes: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, size_bytes: u64, max_bytes: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            flushes: stats.flushes,
            total_entries: stats.total_entries,
            size_bytes,
            max_bytes,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
