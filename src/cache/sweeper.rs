//! Background expiry sweep.

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::ResourceCache;

/// Spawn a task that evicts expired entries every `sweep_interval`.
///
/// The task runs until the returned handle is aborted or the runtime shuts
/// down.
pub fn spawn_sweeper(cache: ResourceCache) -> JoinHandle<()> {
    let period = cache.config().sweep_interval;
    info!("Cache sweeper started (every {:?})", period);

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            cache.sweep();
            debug!("Cache sweep done, {} entries left", cache.entry_count());
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cache::CacheConfig;

    #[tokio::test]
    async fn test_sweeper_evicts_expired() {
        let cache = ResourceCache::new(
            CacheConfig::default()
                .ttl(Duration::from_millis(20))
                .sweep_interval(Duration::from_millis(30)),
        );
        cache.set("concepts", vec![1u8]);

        let handle = spawn_sweeper(cache.clone());
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.entry_count(), 0);
        handle.abort();
    }
}
