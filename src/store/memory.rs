//! In-process document store.
//!
//! Backs the server binary and the test suites. Documents are kept per
//! collection in id order, which is also the order queries return them in.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::DocumentStore;
use crate::models::{Document, Filters};

type Collection = BTreeMap<String, Document>;

// == Store Calls ==
/// Number of calls made to each store operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCalls {
    pub get: u64,
    pub set: u64,
    pub update: u64,
    pub query: u64,
}

impl StoreCalls {
    pub fn total(&self) -> u64 {
        self.get + self.set + self.update + self.query
    }
}

#[derive(Debug, Default)]
struct CallCounters {
    get: AtomicU64,
    set: AtomicU64,
    update: AtomicU64,
    query: AtomicU64,
}

// == Memory Document Store ==
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
    calls: CallCounters,
    unavailable: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how often each operation has been called so far.
    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            get: self.calls.get.load(Ordering::Relaxed),
            set: self.calls.set.load(Ordering::Relaxed),
            update: self.calls.update.load(Ordering::Relaxed),
            query: self.calls.query.load(Ordering::Relaxed),
        }
    }

    /// Makes every subsequent operation fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Writes a document without counting a call, bypassing any cache in front
    /// of the store. Simulates a write by another client.
    pub async fn insert_direct(&self, collection: &str, id: &str, document: Document) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    fn check_available(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::Relaxed) {
            bail!("document store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
        self.calls.get.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;
        debug!("Store get {}/{}", collection, id);

        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> anyhow::Result<()> {
        self.calls.set.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;
        debug!("Store set {}/{}", collection, id);

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> anyhow::Result<()> {
        self.calls.update.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;
        debug!("Store update {}/{}", collection, id);

        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| anyhow!("no document to update: {}/{}", collection, id))?;

        for (field, value) in partial {
            existing.insert(field, value);
        }
        Ok(())
    }

    async fn query_documents(
        &self,
        collection: &str,
        filters: &Filters,
        limit: Option<u64>,
    ) -> anyhow::Result<Vec<Document>> {
        self.calls.query.fetch_add(1, Ordering::Relaxed);
        self.check_available()?;
        debug!("Store query {} ({} filters)", collection, filters.len());

        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let limit = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
        Ok(docs
            .values()
            .filter(|doc| {
                filters
                    .iter()
                    .all(|(field, expected)| doc.get(field) == Some(expected))
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
