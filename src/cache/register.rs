use crate::cache::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Once, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static BUILTIN_PLUGINS: Once = Once::new();

/// Registers a cache backend under `name`, replacing any previous one
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        $crate::cache::register::register_object_cache_plugin(
            $name,
            std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                Box::pin(async {
                    <$ty>::new()
                        .map(|cache| Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        .map_err($crate::errors::DashboardError::cache_connection)
                })
            }),
        )
    };
}

/// Registers the backends shipped with the crate
pub fn register_builtin_plugins() {
    BUILTIN_PLUGINS.call_once(|| {
        crate::declare_object_cache_plugin!("moka", crate::cache::object_cache::moka::MokaCacheWrapper);
    });
}

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let name = name.into();
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .expect("Cache registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_object_cache_registry() {
    let registry = OBJECT_CACHE_REGISTRY
        .read()
        .expect("Cache registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No object cache plugins registered.");
    } else {
        tracing::debug!("Registered object cache plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registration() {
        register_builtin_plugins();
        assert!(get_object_cache_plugin("moka").is_some());
        assert!(get_object_cache_plugin("redis").is_none());
    }
}
