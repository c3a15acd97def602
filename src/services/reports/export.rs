//! Filtered table export as an xlsx workbook

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;
use tracing::{error, info};

use super::{ReportService, build_page};
use crate::errors::Result;
use crate::models::ApiResponse;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::PageKey;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn export_report(
    service: &ReportService,
    request: &HttpRequest,
    page: PageKey,
    selection: FilterSelection,
) -> ActixResult<HttpResponse> {
    let ctx = service.context(request);

    let output = match build_page(&ctx, page, &selection).await {
        Ok(output) => output,
        Err(e) => {
            error!("Failed to build report {} for export: {}", page, e);
            return Ok(ApiResponse::from_error(&e));
        }
    };

    match generate_xlsx(page.as_str(), &output.frame) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("{page}_{timestamp}.xlsx");
            info!("Exported {} rows of report {}", output.frame.len(), page);

            Ok(HttpResponse::Ok()
                .content_type(XLSX_CONTENT_TYPE)
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("Failed to generate xlsx for {}: {}", page, e);
            Ok(ApiResponse::from_error(&e))
        }
    }
}

/// One sheet named after the page: bold header row, then one row per frame row.
/// Nulls stay blank, numbers stay numeric.
pub fn generate_xlsx(sheet_name: &str, frame: &Frame) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet().set_name(sheet_name)?;

    for (col, name) in frame.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (idx, row) in frame.rows.iter().enumerate() {
        let xlsx_row = idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                Value::Null => {}
                Value::Bool(b) => {
                    worksheet.write_boolean(xlsx_row, col, *b)?;
                }
                Value::Number(n) => match n.as_f64() {
                    Some(f) => {
                        worksheet.write_number(xlsx_row, col, f)?;
                    }
                    None => {
                        worksheet.write_string(xlsx_row, col, n.to_string())?;
                    }
                },
                Value::String(s) => {
                    worksheet.write_string(xlsx_row, col, s)?;
                }
                other => {
                    worksheet.write_string(xlsx_row, col, other.to_string())?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
