use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::errors::DashboardError;
use crate::models::filters::FilterSelection;
use crate::models::reports::{PageKey, ReportTableQuery};
use crate::models::ApiResponse;
use crate::services::ReportService;

// Lazily created global ReportService
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// Unknown page keys answer 404 in the usual envelope
fn parse_page(raw: &str) -> Result<PageKey, HttpResponse> {
    raw.parse::<PageKey>()
        .map_err(|msg| ApiResponse::from_error(&DashboardError::not_found(msg)))
}

pub async fn list_reports() -> ActixResult<HttpResponse> {
    REPORT_SERVICE.list_reports().await
}

pub async fn get_report(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ReportTableQuery>,
) -> ActixResult<HttpResponse> {
    let page = match parse_page(&path) {
        Ok(page) => page,
        Err(response) => return Ok(response),
    };
    REPORT_SERVICE
        .get_report(&req, page, query.into_inner())
        .await
}

pub async fn query_report(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ReportTableQuery>,
    body: web::Json<FilterSelection>,
) -> ActixResult<HttpResponse> {
    let page = match parse_page(&path) {
        Ok(page) => page,
        Err(response) => return Ok(response),
    };
    REPORT_SERVICE
        .query_report(&req, page, body.into_inner(), query.into_inner())
        .await
}

pub async fn export_report(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<FilterSelection>,
) -> ActixResult<HttpResponse> {
    let page = match parse_page(&path) {
        Ok(page) => page,
        Err(response) => return Ok(response),
    };
    REPORT_SERVICE
        .export_report(&req, page, body.into_inner())
        .await
}

// Configure routes
pub fn configure_reports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .route("", web::get().to(list_reports))
            .route("/{page}", web::get().to(get_report))
            .route("/{page}/query", web::post().to(query_report))
            .route("/{page}/export", web::post().to(export_report)),
    );
}
