use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{PageOutput, ReportService, build_page};
use crate::config::AppConfig;
use crate::models::filters::FilterSelection;
use crate::models::reports::{PageKey, PageReport, ReportTableQuery, TablePage};
use crate::models::{ApiResponse, PaginationInfo, PaginationQuery};

/// Page size requested by the client, defaulted and capped by the config
pub fn resolve_page_size(requested: Option<u64>, default_size: u64, max_size: u64) -> u64 {
    requested
        .filter(|size| *size > 0)
        .unwrap_or(default_size)
        .min(max_size.max(1))
}

/// Assembles the response body, slicing the frame to one table page
pub fn assemble_report(page: PageKey, output: PageOutput, paging: &PaginationQuery) -> PageReport {
    let dashboard = &AppConfig::get().dashboard;
    let size = resolve_page_size(
        paging.size,
        dashboard.table_page_size,
        dashboard.max_table_page_size,
    );
    let pagination = PaginationInfo::new(paging.page, size, output.frame.len() as u64);
    let rows = output.frame.rows[pagination.range()].to_vec();

    PageReport {
        page,
        title: page.title().to_string(),
        filters: output.filters,
        date_bounds: output.date_bounds,
        warnings: output.warnings,
        empty: output.empty,
        kpis: output.kpis,
        charts: output.charts,
        table: TablePage {
            columns: output.frame.columns,
            rows,
            pagination,
        },
        generated_at: chrono::Utc::now(),
    }
}

pub async fn query_report(
    service: &ReportService,
    request: &HttpRequest,
    page: PageKey,
    selection: FilterSelection,
    query: ReportTableQuery,
) -> ActixResult<HttpResponse> {
    let ctx = service.context(request);

    match build_page(&ctx, page, &selection).await {
        Ok(output) => {
            info!(
                "Built report {} with {} rows and {} warnings",
                page,
                output.frame.len(),
                output.warnings.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assemble_report(page, output, &query.pagination),
                "Report generated successfully",
            )))
        }
        Err(e) => {
            error!("Failed to build report {}: {}", page, e);
            Ok(ApiResponse::from_error(&e))
        }
    }
}
