//! Document Service
//!
//! Read-through / write-through orchestration between the cache and the
//! document store. Every operation validates first, then consults or
//! populates the cache, and only falls back to the store on a miss. Failed
//! operations never populate the cache, and nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{document_key, query_key, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{DocCacheError, Result};
use crate::models::{Document, DocumentDescriptor, Filters, QueryDescriptor};
use crate::store::DocumentStore;
use crate::validate;

// == Document Service ==
/// Cache-fronted access to a [`DocumentStore`].
///
/// The cache is shared behind `Arc<RwLock<_>>`; clones of the service share
/// both the store and the cache.
pub struct DocumentService<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    cache: Arc<RwLock<CacheStore>>,
    ttl: Duration,
}

impl<S: DocumentStore + ?Sized> Clone for DocumentService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
        }
    }
}

impl<S: DocumentStore + ?Sized> DocumentService<S> {
    // == Constructors ==
    /// Creates a service over `store` with an injected cache.
    pub fn new(store: Arc<S>, cache: Arc<RwLock<CacheStore>>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// Creates a service with its own cache sized from `config`.
    pub fn from_config(store: Arc<S>, config: &Config) -> Self {
        let cache = CacheStore::new(config.cache_max_megabytes);
        Self::new(
            store,
            Arc::new(RwLock::new(cache)),
            Duration::from_secs(config.cache_ttl_seconds),
        )
    }

    /// Shared handle to the cache, for the cleanup task and stats.
    pub fn cache(&self) -> &Arc<RwLock<CacheStore>> {
        &self.cache
    }

    /// The underlying document store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // == Create ==
    /// Writes `document` to the store, then caches it under its document key.
    pub async fn create(&self, descriptor: &DocumentDescriptor, document: Document) -> Result<()> {
        validate::check_document(descriptor)?;

        let serialized = serde_json::to_string(&document)?;
        self.store
            .set_document(&descriptor.collection, &descriptor.id, document)
            .await
            .map_err(DocCacheError::Store)?;

        self.populate(document_key(descriptor), serialized).await;
        Ok(())
    }

    // == Read One ==
    /// Returns one document, from the cache when possible.
    ///
    /// A cache hit never reaches the store, so writes made to the store by
    /// other clients are only observed once the entry expires or is
    /// overwritten through this service.
    pub async fn read_one(&self, descriptor: &DocumentDescriptor) -> Result<Document> {
        validate::check_document(descriptor)?;

        let key = document_key(descriptor);
        if let Some(document) = self.lookup(&key).await? {
            return Ok(document);
        }

        let document = self
            .store
            .get_document(&descriptor.collection, &descriptor.id)
            .await
            .map_err(DocCacheError::Store)?
            .ok_or_else(|| not_found(descriptor))?;

        self.populate(key, serde_json::to_string(&document)?).await;
        Ok(document)
    }

    // == Read Many ==
    /// Returns the documents matching `filters`, from the cache when possible.
    pub async fn read_many(
        &self,
        query: &QueryDescriptor,
        filters: &Filters,
    ) -> Result<Vec<Document>> {
        validate::check_query(query)?;

        let key = query_key(query, filters);
        if let Some(documents) = self.lookup(&key).await? {
            return Ok(documents);
        }

        let documents = self
            .store
            .query_documents(&query.collection, filters, query.limit)
            .await
            .map_err(DocCacheError::Store)?;

        self.populate(key, serde_json::to_string(&documents)?).await;
        Ok(documents)
    }

    // == Update One ==
    /// Applies `partial` in the store, re-fetches the full document from the
    /// store and caches it.
    pub async fn update_one(
        &self,
        descriptor: &DocumentDescriptor,
        partial: Document,
    ) -> Result<Document> {
        validate::check_document(descriptor)?;

        self.store
            .update_document(&descriptor.collection, &descriptor.id, partial)
            .await
            .map_err(DocCacheError::Store)?;

        let key = document_key(descriptor);
        let document = self
            .store
            .get_document(&descriptor.collection, &descriptor.id)
            .await
            .map_err(DocCacheError::Store)?
            .ok_or_else(|| not_found(descriptor))?;

        self.populate(key, serde_json::to_string(&document)?).await;
        Ok(document)
    }

    // == Cache Management ==
    /// Drops every cached entry, returning how many were removed.
    pub async fn clear_cache(&self) -> usize {
        self.cache.write().await.clear()
    }

    /// Returns current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Helpers ==
    async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        // Write lock: a lookup updates stats and may drop an expired entry
        let cached = self.cache.write().await.get(key);
        match cached {
            Some(serialized) => {
                debug!("Cache hit: {}", key);
                Ok(Some(serde_json::from_str(&serialized)?))
            }
            None => {
                debug!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    async fn populate(&self, key: String, serialized: String) {
        self.cache.write().await.put(key, serialized, self.ttl);
    }
}

/// NotFound carries the unescaped `collection/id`, not the cache key.
fn not_found(descriptor: &DocumentDescriptor) -> DocCacheError {
    DocCacheError::NotFound(format!("{}/{}", descriptor.collection, descriptor.id))
}
