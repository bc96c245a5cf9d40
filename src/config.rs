//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds applied to every cache entry
    pub cache_ttl_seconds: u64,
    /// Byte budget of the cache, in megabytes
    pub cache_max_megabytes: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Entry TTL in seconds (default: 3600)
    /// - `CACHE_MAX_MEGABYTES` - Cache byte budget in megabytes (default: 64)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds),
            cache_max_megabytes: parse_var("CACHE_MAX_MEGABYTES", defaults.cache_max_megabytes),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 3600,
            cache_max_megabytes: 64,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
