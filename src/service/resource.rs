//! Entity contract and shared handles.

use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;

/// Handle to one in-memory entity.
///
/// The cache owns the canonical instance and every accessor gets a clone of
/// this handle. A write through any handle is seen by all other holders
/// until the cache entry expires or is replaced.
pub type Shared<T> = Arc<RwLock<T>>;

/// Handle to a cached, ordered list of entity handles.
pub type SharedList<T> = Arc<RwLock<Vec<Shared<T>>>>;

/// Wrap an entity in a fresh handle.
pub fn share<T>(entity: T) -> Shared<T> {
    Arc::new(RwLock::new(entity))
}

/// An entity type served by the datastore.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Primary key. Width varies per type (8, 16 or 32 bits).
    type Id: Copy + Eq + Hash + Display + FromStr + Send + Sync + 'static;

    /// Human-readable kind used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}
