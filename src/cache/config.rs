//! Cache configuration.

use std::time::Duration;

use crate::config::{Config, DEFAULT_CACHE_SWEEP, DEFAULT_CACHE_TTL};

/// Configuration for the resource cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries, counted from the last `set`.
    /// Reads never extend it.
    pub ttl: Duration,

    /// How often the sweeper evicts expired entries.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: DEFAULT_CACHE_TTL,
            sweep_interval: DEFAULT_CACHE_SWEEP,
        }
    }
}

impl CacheConfig {
    /// Build the cache config from application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            ttl: config.cache_ttl,
            sweep_interval: config.cache_sweep_interval,
            ..Default::default()
        }
    }

    /// Set max capacity for cache (builder pattern).
    #[must_use]
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Set time-to-live for cache entries.
    #[must_use]
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.ttl = duration;
        self
    }

    /// Set the sweep interval.
    #[must_use]
    pub fn sweep_interval(mut self, duration: Duration) -> Self {
        self.sweep_interval = duration;
        self
    }
}
