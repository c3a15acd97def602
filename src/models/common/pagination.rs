use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Pagination query parameters
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_u64"
    )]
    pub page: u64,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_u64")]
    pub size: Option<u64>,
}

// Pagination info in responses
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let page_size = page_size.max(1);
        Self {
            page: page.max(1),
            page_size,
            total,
            total_pages: total.div_ceil(page_size),
        }
    }

    /// Index range of the current page inside `0..total`
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self
            .page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        start as usize..end as usize
    }
}

// Accepts numbers and numeric strings
fn deserialize_string_to_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a positive integer or a string containing one")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            u64::try_from(value).map_err(|_| Error::invalid_value(Unexpected::Signed(value), &self))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

fn deserialize_optional_string_to_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_string_to_u64(deserializer).map(Some)
}

fn default_page() -> u64 {
    1
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_range() {
        let info = PaginationInfo::new(2, 10, 25);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.range(), 10..20);

        let last = PaginationInfo::new(3, 10, 25);
        assert_eq!(last.range(), 20..25);

        let past_end = PaginationInfo::new(9, 10, 25);
        assert_eq!(past_end.range(), 25..25);

        let huge_page = PaginationInfo::new(u64::MAX, 50, 3);
        assert_eq!(huge_page.range(), 3..3);

        let huge_size = PaginationInfo::new(1, u64::MAX, 3);
        assert_eq!(huge_size.range(), 0..3);
    }

    #[test]
    fn test_query_accepts_strings() {
        let query: PaginationQuery = serde_json::from_str(r#"{"page":"3","size":"20"}"#).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.size, Some(20));

        let defaults: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults.page, 1);
        assert_eq!(defaults.size, None);
    }
}
