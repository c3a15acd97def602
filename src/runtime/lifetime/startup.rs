use crate::cache::ObjectCache;
use crate::cache::register::{get_object_cache_plugin, register_builtin_plugins};
use crate::config::AppConfig;
use crate::errors::{DashboardError, Result};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => Some(Arc::from(cache)),
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// Cache backend named by `cache.type`, falling back to moka
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    info!("Creating {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }
    if cache_type != "moka" {
        warn!("Cache backend '{}' unavailable, falling back to moka", cache_type);
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }
    Err(DashboardError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// Connects storage and cache before the server binds
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized");

    if let Err(e) = storage.ping().await {
        warn!("Database is not reachable yet: {}", e);
    } else {
        debug!("Database ping succeeded");
    }

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}
