//! Cache module - process-wide TTL store using Moka.
//!
//! One `ResourceCache` is created at process start and shared by every
//! resource service. Entries expire a fixed time after they were written;
//! reading does not refresh them. A background sweeper evicts expired
//! entries periodically.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = ResourceCache::new(CacheConfig::default());
//! let _sweeper = spawn_sweeper(cache.clone());
//!
//! cache.set("chapters", chapters);
//! let chapters: Option<SharedList<Chapter>> = cache.get("chapters");
//! ```

mod config;
mod store;
mod sweeper;

pub use config::CacheConfig;
pub use store::ResourceCache;
pub use sweeper::spawn_sweeper;
