pub mod context;
pub mod export;
pub mod list;
mod pages;
pub mod query;

pub use context::{PageOutput, ReportContext};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::Result;
use crate::models::filters::FilterSelection;
use crate::models::reports::{PageKey, ReportTableQuery};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// The cache is optional; without one every request reads the database
    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        self.cache.clone().or_else(|| {
            request
                .app_data::<web::Data<Arc<dyn ObjectCache>>>()
                .map(|cache| cache.get_ref().clone())
        })
    }

    pub(crate) fn context(&self, request: &HttpRequest) -> ReportContext {
        ReportContext::new(self.get_storage(request), self.get_cache(request))
    }

    pub async fn list_reports(&self) -> ActixResult<HttpResponse> {
        list::list_reports().await
    }

    pub async fn get_report(
        &self,
        request: &HttpRequest,
        page: PageKey,
        query: ReportTableQuery,
    ) -> ActixResult<HttpResponse> {
        query::query_report(self, request, page, FilterSelection::default(), query).await
    }

    pub async fn query_report(
        &self,
        request: &HttpRequest,
        page: PageKey,
        selection: FilterSelection,
        query: ReportTableQuery,
    ) -> ActixResult<HttpResponse> {
        query::query_report(self, request, page, selection, query).await
    }

    pub async fn export_report(
        &self,
        request: &HttpRequest,
        page: PageKey,
        selection: FilterSelection,
    ) -> ActixResult<HttpResponse> {
        export::export_report(self, request, page, selection).await
    }
}

/// Runs one page definition against a context
pub async fn build_page(
    ctx: &ReportContext,
    page: PageKey,
    selection: &FilterSelection,
) -> Result<PageOutput> {
    pages::build(ctx, page, selection).await
}
