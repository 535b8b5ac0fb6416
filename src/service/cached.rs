//! Generic cached resource service.
//!
//! Reads consult the cache first and fall back to the datastore; writes go
//! to the datastore first and are then mirrored into whatever list is
//! resident in the cache. The cache only ever reflects values the datastore
//! has already accepted.
//!
//! Concurrent misses on the same key are not coalesced: each caller fetches
//! and each stores its own list, and the last writer wins.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::resource::{Resource, Shared, SharedList, share};
use crate::cache::ResourceCache;
use crate::error::{Result, ServiceError};
use crate::remote::{Gateway, Method, RequestBody};
use crate::utils::join_endpoint;

/// Where a list read may look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Cache, then the datastore on a miss.
    #[default]
    CacheFirst,
    /// Cache only. A miss is "nothing resident", not an error.
    CacheOnly,
    /// Skip the cache and always fetch (the result is still cached).
    ForceRemote,
}

/// Read/write access to one entity type through the shared cache.
pub struct ResourceService<T> {
    cache: ResourceCache,
    gateway: Arc<dyn Gateway>,
    _entity: PhantomData<fn() -> T>,
}

// Clones share the cache and gateway, so `T` needs no `Clone` bound here.
impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            gateway: Arc::clone(&self.gateway),
            _entity: PhantomData,
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(cache: ResourceCache, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            cache,
            gateway,
            _entity: PhantomData,
        }
    }

    /// List entities under `key`, following `policy`.
    ///
    /// Returns `Ok(None)` only for `CacheOnly` with nothing resident. Any
    /// other successful call leaves a populated cache entry behind.
    pub async fn list_entities(
        &self,
        endpoint: &str,
        key: &str,
        policy: FetchPolicy,
    ) -> Result<Option<SharedList<T>>> {
        if policy != FetchPolicy::ForceRemote {
            if let Some(list) = self.cached(key) {
                return Ok(Some(list));
            }
            if policy == FetchPolicy::CacheOnly {
                return Ok(None);
            }
        }

        self.refresh(endpoint, key).await.map(Some)
    }

    /// Cache-first list read.
    pub async fn list(&self, endpoint: &str, key: &str) -> Result<SharedList<T>> {
        match self.cached(key) {
            Some(list) => Ok(list),
            None => self.refresh(endpoint, key).await,
        }
    }

    /// Cache-only list read.
    pub fn cached(&self, key: &str) -> Option<SharedList<T>> {
        let list = self.cache.get::<SharedList<T>>(key);
        debug!("Cache {} for {}", if list.is_some() { "hit" } else { "miss" }, key);
        list
    }

    /// Fetch the list from the datastore and store it under `key`,
    /// replacing whatever was resident.
    pub async fn refresh(&self, endpoint: &str, key: &str) -> Result<SharedList<T>> {
        let bytes = self.gateway.call(endpoint, Method::Get, None).await?;
        let entities: Vec<T> = decode(&bytes)?;
        debug!("Fetched {} {} entities from {}", entities.len(), T::KIND, endpoint);

        let list: SharedList<T> = Arc::new(RwLock::new(entities.into_iter().map(share).collect()));
        self.cache.set(key, Arc::clone(&list));
        Ok(list)
    }

    /// Find one entity.
    ///
    /// If a list is resident under `key` it is scanned with `matches` and the
    /// first hit is returned; no hit gives `Ok(None)` without asking the
    /// datastore. With nothing resident the entity is fetched directly from
    /// `endpoint/id` (or `endpoint` alone when `id` is empty). That fetched
    /// entity is not inserted into any cached list.
    pub async fn get_entity<F>(
        &self,
        id: &str,
        matches: F,
        key: &str,
        endpoint: &str,
    ) -> Result<Option<Shared<T>>>
    where
        F: Fn(&T) -> bool + Send,
    {
        if let Some(list) = self.cached(key) {
            return Ok(find_in(&list, &matches));
        }

        let bytes = self
            .gateway
            .call(&join_endpoint(endpoint, id), Method::Get, None)
            .await?;
        let entity: T = decode(&bytes)?;
        Ok(Some(share(entity)))
    }

    /// `get_entity` matching on the primary key.
    pub async fn get_by_id(&self, id: T::Id, key: &str, endpoint: &str) -> Result<Option<Shared<T>>> {
        self.get_entity(&id.to_string(), move |e: &T| e.id() == id, key, endpoint)
            .await
    }

    /// Patch `endpoint/id` and mirror the datastore's answer into the cache.
    ///
    /// When a resident list holds an entity accepted by `matches`, that
    /// entity is overwritten in place with the response and its handle is
    /// returned, so every other holder sees the new value. Otherwise a fresh
    /// handle is returned and the cache is left as it was.
    pub async fn update_entity<F>(
        &self,
        id: &str,
        endpoint: &str,
        body: RequestBody,
        key: &str,
        matches: F,
    ) -> Result<Shared<T>>
    where
        F: Fn(&T) -> bool + Send,
    {
        let bytes = self
            .gateway
            .call(&join_endpoint(endpoint, id), Method::Patch, Some(body))
            .await?;
        let updated: T = decode(&bytes)?;

        match self.cached(key).and_then(|list| find_in(&list, &matches)) {
            Some(cached) => {
                *cached.write() = updated;
                debug!("Updated cached {} {}", T::KIND, id);
                Ok(cached)
            }
            None => {
                debug!("No cached {} {} to update", T::KIND, id);
                Ok(share(updated))
            }
        }
    }

    /// Create an entity and append it to the resident list, if any.
    pub async fn add_entity(&self, body: RequestBody, key: &str, endpoint: &str) -> Result<Shared<T>> {
        let bytes = self.gateway.call(endpoint, Method::Post, Some(body)).await?;
        let created = share(decode::<T>(&bytes)?);

        if let Some(list) = self.cached(key) {
            list.write().push(Arc::clone(&created));
            debug!("Appended new {} to {}", T::KIND, key);
        }

        Ok(created)
    }

    /// Delete `endpoint/id` and drop it from the resident list, if any.
    pub async fn delete_entity(&self, id: T::Id, key: &str, endpoint: &str) -> Result<()> {
        self.gateway
            .call(&join_endpoint(endpoint, &id.to_string()), Method::Delete, None)
            .await?;

        self.evict(id, key);
        Ok(())
    }

    /// Send a status patch (e.g. archived) and drop the entity from the
    /// resident list, if any.
    pub async fn archive_entity(
        &self,
        id: T::Id,
        endpoint: &str,
        body: RequestBody,
        key: &str,
    ) -> Result<()> {
        self.gateway
            .call(&join_endpoint(endpoint, &id.to_string()), Method::Patch, Some(body))
            .await?;

        self.evict(id, key);
        Ok(())
    }

    fn evict(&self, id: T::Id, key: &str) {
        if let Some(list) = self.cached(key) {
            let mut entities = list.write();
            let before = entities.len();
            entities.retain(|e| e.read().id() != id);
            debug!("Removed {} cached {} {}", before - entities.len(), T::KIND, id);
        }
    }
}

fn find_in<T, F>(list: &SharedList<T>, matches: &F) -> Option<Shared<T>>
where
    F: Fn(&T) -> bool,
{
    list.read().iter().find(|e| matches(&e.read())).cloned()
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(ServiceError::Decode)
}
