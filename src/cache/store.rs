//! Cache Store Module
//!
//! Main cache engine: a HashMap of serialized values with lazy TTL expiration
//! and a coarse, whole-cache byte budget.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, BYTES_PER_MEGABYTE};

// == Cache Store ==
/// Serialized-value cache with TTL expiry and full-flush eviction.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Budget for the serialized size of the whole store
    max_bytes: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with a budget of `max_megabytes`.
    pub fn new(max_megabytes: u64) -> Self {
        Self::with_byte_budget(max_megabytes.saturating_mul(BYTES_PER_MEGABYTE))
    }

    /// Creates a new CacheStore with a budget expressed directly in bytes.
    pub fn with_byte_budget(max_bytes: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_bytes,
        }
    }

    // == Put ==
    /// Stores a serialized value under `key`, expiring after `ttl`.
    ///
    /// The size of the store is measured before the insert. If it is strictly
    /// greater than the budget, every entry is dropped first. The new entry is
    /// always inserted, so a single put may leave the store over budget until
    /// the next one.
    ///
    /// The measurement walks the whole store (see [`CacheStore::size_bytes`]),
    /// so every put costs O(total cached bytes) while the caller holds the
    /// write lock.
    pub fn put(&mut self, key: String, value: String, ttl: Duration) {
        let size = self.size_bytes();
        if size > self.max_bytes {
            let dropped = self.entries.len();
            self.entries.clear();
            self.stats.record_flush();
            info!(
                "Cache flushed: {} bytes exceeded budget of {} bytes, dropped {} entries",
                size, self.max_bytes, dropped
            );
        }

        self.entries.insert(key, CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value stored under `key` if present and not expired.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                debug!("Cache entry expired: {}", key);
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Size ==
    /// Returns the length in bytes of the JSON serialization of the whole store.
    ///
    /// Nothing is cached between calls: every call re-serializes every entry
    /// into a counting sink, O(total cached bytes) without allocating.
    pub fn size_bytes(&self) -> u64 {
        let mut counter = ByteCounter(0);
        // Serializing string keys and plain structs into a counter cannot fail
        match serde_json::to_writer(&mut counter, &self.entries) {
            Ok(()) => counter.0,
            Err(_) => 0,
        }
    }

    /// Returns the configured byte budget.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sink that only counts the bytes written to it.
struct ByteCounter(u64);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(64);
        assert!(store.is_empty());
        assert_eq!(store.max_bytes(), 64 * 1024 * 1024);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(1);

        store.put("tasks:1".to_string(), "{}".to_string(), HOUR);

        assert_eq!(store.get("tasks:1").as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::new(1);
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(1);

        store.put("k".to_string(), "v1".to_string(), HOUR);
        store.put("k".to_string(), "v2".to_string(), HOUR);

        assert_eq!(store.get("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(1);

        store.put("k".to_string(), "v".to_string(), Duration::from_millis(50));
        assert!(store.get("k").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("k").is_none());
        assert!(store.is_empty(), "Expired entry should be dropped on access");
    }

    #[test]
    fn test_size_bytes_matches_serialization() {
        let mut store = CacheStore::new(1);
        assert_eq!(store.size_bytes(), 2); // "{}"

        store.put("k".to_string(), "v".to_string(), HOUR);
        let expected = serde_json::to_string(&store.entries).unwrap().len() as u64;
        assert_eq!(store.size_bytes(), expected);
    }

    #[test]
    fn test_flush_when_over_budget() {
        let mut store = CacheStore::with_byte_budget(100);

        store.put("a".to_string(), "x".repeat(200), HOUR);
        store.put("b".to_string(), "y".to_string(), HOUR);

        assert!(store.get("a").is_none(), "Oversize store should be flushed");
        assert_eq!(store.get("b").as_deref(), Some("y"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().flushes, 1);
    }

    #[test]
    fn test_measure_before_insert() {
        let mut store = CacheStore::with_byte_budget(100);

        // Empty store measures under budget, so this oversize value is kept
        store.put("a".to_string(), "x".repeat(500), HOUR);
        assert!(store.size_bytes() > store.max_bytes());
        assert!(store.get("a").is_some());
        assert_eq!(store.stats().flushes, 0);
    }

    #[test]
    fn test_budget_comparison_is_strict() {
        let mut store = CacheStore::with_byte_budget(0);
        store.put("a".to_string(), "1".to_string(), HOUR);

        let exact = store.size_bytes();
        let mut store = CacheStore::with_byte_budget(exact);
        store.put("a".to_string(), "1".to_string(), HOUR);
        store.put("b".to_string(), "2".to_string(), HOUR);

        assert_eq!(store.len(), 2, "Size equal to budget must not flush");
        assert_eq!(store.stats().flushes, 0);
    }

    #[test]
    fn test_clear() {
        let mut store = CacheStore::new(1);
        store.put("a".to_string(), "1".to_string(), HOUR);
        store.put("b".to_string(), "2".to_string(), HOUR);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert!(store.get("a").is_none());
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(1);

        store.put("k".to_string(), "v".to_string(), HOUR);
        store.get("k");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_purge_expired() {
        let mut store = CacheStore::new(1);

        store.put("short".to_string(), "1".to_string(), Duration::from_millis(50));
        store.put("long".to_string(), "2".to_string(), HOUR);

        sleep(Duration::from_millis(80));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("long").is_some());
    }
}
