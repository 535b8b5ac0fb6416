//! Process-wide TTL store over Moka.

use std::any::{Any, type_name};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, warn};

use super::CacheConfig;

type CacheValue = Arc<dyn Any + Send + Sync>;

/// Key to value store with a fixed entry lifetime.
///
/// Values of any type can live side by side; each key holds exactly one
/// value and `set` replaces, never merges. Cloning the store is cheap and
/// every clone sees the same entries.
///
/// Stored values are usually handles (`Arc`s). `get` hands out a clone of the
/// handle, not of the data behind it, so callers mutate the cached data in
/// place instead of writing it back.
#[derive(Clone)]
pub struct ResourceCache {
    inner: Cache<String, CacheValue>,
    config: Arc<CacheConfig>,
}

impl ResourceCache {
    /// Create a new store with the given config.
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl)
            .build();

        Self {
            inner,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Store a value under `key` with the default lifetime.
    pub fn set<V>(&self, key: impl Into<String>, value: V)
    where
        V: Any + Send + Sync,
    {
        let key = key.into();
        debug!("Cache set: {}", key);
        self.inner.insert(key, Arc::new(value));
    }

    /// Get the value stored under `key`.
    ///
    /// Returns `None` if the key is absent, expired (even if not yet swept),
    /// or holds a value of another type.
    pub fn get<V>(&self, key: &str) -> Option<V>
    where
        V: Any + Clone + Send + Sync,
    {
        let value = self.inner.get(key)?;
        match value.downcast_ref::<V>() {
            Some(v) => Some(v.clone()),
            None => {
                warn!("Cache entry '{}' is not a {}", key, type_name::<V>());
                None
            }
        }
    }

    /// Remove a key.
    pub fn delete(&self, key: &str) {
        self.inner.invalidate(key);
    }

    /// Evict expired entries now.
    pub fn sweep(&self) {
        self.inner.run_pending_tasks();
    }

    /// Number of entries, including expired ones not yet swept.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entry_count", &self.inner.entry_count())
            .field("ttl", &self.config.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use parking_lot::RwLock;

    use super::*;

    #[test]
    fn test_set_get_delete() {
        let cache = ResourceCache::new(CacheConfig::default());
        assert_eq!(cache.get::<Vec<i32>>("chapters"), None);

        cache.set("chapters", vec![1, 2, 3]);
        assert_eq!(cache.get::<Vec<i32>>("chapters"), Some(vec![1, 2, 3]));

        cache.delete("chapters");
        assert_eq!(cache.get::<Vec<i32>>("chapters"), None);
    }

    #[test]
    fn test_set_replaces() {
        let cache = ResourceCache::new(CacheConfig::default());
        cache.set("topics", vec![1, 2]);
        cache.set("topics", vec![9]);
        assert_eq!(cache.get::<Vec<i32>>("topics"), Some(vec![9]));
    }

    #[test]
    fn test_type_mismatch_is_absent() {
        let cache = ResourceCache::new(CacheConfig::default());
        cache.set("tags", "not a list".to_string());
        assert_eq!(cache.get::<Vec<i32>>("tags"), None);
        assert_eq!(cache.get::<String>("tags").as_deref(), Some("not a list"));
    }

    #[test]
    fn test_expired_entries_invisible_before_sweep() {
        let cache = ResourceCache::new(CacheConfig::default().ttl(Duration::from_millis(50)));
        cache.set("grades", vec![1]);
        assert!(cache.get::<Vec<i32>>("grades").is_some());

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get::<Vec<i32>>("grades"), None);

        cache.sweep();
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_handles_are_shared() {
        let cache = ResourceCache::new(CacheConfig::default());
        let shared = Arc::new(RwLock::new(String::from("draft")));
        cache.set("status", Arc::clone(&shared));

        let fetched = cache.get::<Arc<RwLock<String>>>("status").unwrap();
        *fetched.write() = "published".into();

        assert_eq!(*shared.read(), "published");
    }
}
