use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SystemService;
use crate::models::ApiResponse;

pub async fn refresh_cache(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(cache) = service.get_cache(request) {
        cache.invalidate_all().await;
        info!("Cached tables invalidated");
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Cache refreshed")))
}
