//! Document Store Module
//!
//! The external document database the cache sits in front of. Only the four
//! operations the cache layer needs are modelled; failures are opaque
//! `anyhow` errors that the service passes through unchanged.

mod memory;

use async_trait::async_trait;

use crate::models::{Document, Filters};

pub use memory::{MemoryDocumentStore, StoreCalls};

/// Backing document database.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Fetches one document, `None` if it does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>>;

    /// Creates or replaces one document.
    async fn set_document(&self, collection: &str, id: &str, document: Document)
        -> anyhow::Result<()>;

    /// Merges `partial` into an existing document.
    async fn update_document(&self, collection: &str, id: &str, partial: Document)
        -> anyhow::Result<()>;

    /// Returns the documents matching every equality filter, in store order,
    /// truncated to `limit` when given.
    async fn query_documents(
        &self,
        collection: &str,
        filters: &Filters,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Document>>;
}
