use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::entities::{KpiCard, PageKey};
use crate::models::PaginationInfo;
use crate::models::charts::ChartPanel;
use crate::models::filters::{DateBounds, FilterPanel};

// Raw-data preview of the filtered frame
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct TablePage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct PageReport {
    pub page: PageKey,
    pub title: String,
    pub filters: FilterPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_bounds: Option<DateBounds>,
    pub warnings: Vec<String>,
    pub empty: bool,
    pub kpis: Vec<KpiCard>,
    pub charts: Vec<ChartPanel>,
    pub table: TablePage,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

// Entry of the report listing
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportSummary {
    pub page: PageKey,
    pub title: String,
    pub parent: Option<PageKey>,
}

impl From<PageKey> for ReportSummary {
    fn from(page: PageKey) -> Self {
        Self {
            page,
            title: page.title().to_string(),
            parent: page.parent(),
        }
    }
}
