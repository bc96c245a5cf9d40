//! Cache Module
//!
//! In-memory cache of serialized documents with TTL expiration, a coarse
//! byte budget and deterministic key derivation.

mod entry;
pub mod keys;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use keys::{document_key, query_key};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Bytes per configured megabyte of cache budget
pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;
