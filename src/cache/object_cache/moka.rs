use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;

pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        if config.cache.memory.max_capacity == 0 {
            return Err("cache.memory.max_capacity must be greater than 0".to_string());
        }
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    /// `max_capacity` counts entries; each entry is one loaded table
    pub fn with_settings(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, ttl: {}s",
            max_capacity, ttl_secs
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(value) = self.inner.get(key).await {
            debug!("Cache hit: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Cache miss: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // TTL is global for the whole cache
        self.inner.insert(key, value).await;
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL, using global TTL configuration");
        }
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
        // make the invalidation visible to the next lookup
        self.inner.run_pending_tasks().await;
    }
}
