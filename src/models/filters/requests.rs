use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

// Inclusive date range picked in the date filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/filter.ts")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// Interactive selections sent with a report query
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/filter.ts")]
pub struct FilterSelection {
    /// Filter key to the selected option values (or their display labels)
    #[serde(default)]
    pub values: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

impl FilterSelection {
    pub fn selected(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_deserialize() {
        let selection: FilterSelection = serde_json::from_str(
            r#"{"values":{"gender":["ស្រី"]},"date_range":{"start":"2024-01-01","end":"2024-03-31"}}"#,
        )
        .unwrap();
        assert_eq!(selection.selected("gender"), ["ស្រី".to_string()]);
        assert!(selection.selected("province").is_empty());

        let range = selection.date_range.unwrap();
        assert!(range.is_valid());
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn test_empty_body_is_no_filter() {
        let selection: FilterSelection = serde_json::from_str("{}").unwrap();
        assert!(selection.values.is_empty());
        assert!(selection.date_range.is_none());
    }
}
