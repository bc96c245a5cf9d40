//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and flushes.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of full flushes triggered by the byte budget
    pub flushes: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Flush ==
    pub fn record_flush(&mut self) {
        self.flushes += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
