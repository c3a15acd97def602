use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthStatus {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub database: bool,
    pub uptime_seconds: i64,
}

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);

    let database = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database health check failed: {}", e);
            false
        }
    };

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    let status = HealthStatus {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        database,
        uptime_seconds,
    };

    if database {
        Ok(HttpResponse::Ok().json(ApiResponse::success(status, "Service is healthy")))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            ErrorCode::DatabaseUnavailable,
            status,
            "Database is unavailable",
        )))
    }
}
