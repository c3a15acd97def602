use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::reports::{PageKey, ReportSummary};

pub fn report_summaries() -> Vec<ReportSummary> {
    PageKey::all().iter().copied().map(ReportSummary::from).collect()
}

pub async fn list_reports() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        report_summaries(),
        "Report pages retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_is_listed_once() {
        let summaries = report_summaries();
        assert_eq!(summaries.len(), PageKey::all().len());
        let teacher = summaries
            .iter()
            .find(|s| s.page == PageKey::Teacher)
            .unwrap();
        assert_eq!(teacher.parent, Some(PageKey::Tvetsms));
        assert_eq!(teacher.title, PageKey::Teacher.title());
    }
}
