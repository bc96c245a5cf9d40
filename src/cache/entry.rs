//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

// == Cache Entry ==
/// A single serialized document (or document list) with its expiry time.
///
/// The serialized form of this struct is what the store's byte accounting
/// measures, so it only carries the fields a cached value actually needs.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    /// The serialized value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);

        Self {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its expiration time.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
