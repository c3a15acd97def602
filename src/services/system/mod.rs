pub mod cache_refresh;
pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::storage::Storage;

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .expect("Storage not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(self, request).await
    }

    // "Refresh Data": drop every cached table
    pub async fn refresh_cache(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        cache_refresh::refresh_cache(self, request).await
    }
}
