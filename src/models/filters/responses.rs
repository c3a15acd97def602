use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// One dropdown option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/filter.ts")]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

// A multi-select filter with its current options and applied values
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/filter.ts")]
pub struct FilterState {
    pub key: String,
    pub label: String,
    pub options: Vec<FilterOption>,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/filter.ts")]
pub struct FilterPanel {
    pub filters: Vec<FilterState>,
}

// Bounds of the date filter column
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/filter.ts")]
pub struct DateBounds {
    pub key: String,
    pub label: String,
    pub min: NaiveDate,
    pub max: NaiveDate,
}
