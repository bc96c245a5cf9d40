//! Doc Cache - A read-through document cache
//!
//! Fronts a document store with a TTL-expiring, size-bounded cache keyed by
//! document and query descriptors.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;
pub mod validate;

pub use api::AppState;
pub use config::Config;
pub use error::{DocCacheError, Result};
pub use service::DocumentService;
pub use store::{DocumentStore, MemoryDocumentStore};
pub use tasks::spawn_cleanup_task;
