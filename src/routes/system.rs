use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// Lazily created global SystemService
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&request).await
}

pub async fn refresh_cache(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.refresh_cache(&request).await
}

pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .route("/health", web::get().to(health))
            .route("/cache/refresh", web::post().to(refresh_cache)),
    );
}
