//! Object cache
//!
//! Backends are registered by name in [`register`] and picked from `cache.type` at startup.
//! Values are stored as JSON strings; [`ObjectCacheExt`] adds typed access on top.

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Lookup result
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` in seconds, 0 uses the backend default
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// Typed helpers over [`ObjectCache`]
#[async_trait]
pub trait ObjectCacheExt: ObjectCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::warn!("Dropping undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    async fn insert<T: Serialize + Sync>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}

impl<C: ObjectCache + ?Sized> ObjectCacheExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    #[tokio::test]
    async fn test_typed_roundtrip_and_invalidate() {
        let cache = MokaCacheWrapper::with_settings(16, 60);
        cache
            .insert("rows".to_string(), &vec![1_i64, 2, 3], 0)
            .await;

        assert_eq!(
            cache.get::<Vec<i64>>("rows").await,
            CacheResult::Found(vec![1, 2, 3])
        );

        cache.invalidate_all().await;
        assert_eq!(cache.get::<Vec<i64>>("rows").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let cache = MokaCacheWrapper::with_settings(16, 60);
        cache
            .insert_raw("bad".to_string(), "not json".to_string(), 0)
            .await;

        assert_eq!(
            cache.get::<Vec<i64>>("bad").await,
            CacheResult::ExistsButNoValue
        );
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }
}
