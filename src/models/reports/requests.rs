use serde::Deserialize;
use ts_rs::TS;

use crate::models::PaginationQuery;

// Query string of the report endpoints, pages the raw-data table
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportTableQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}
