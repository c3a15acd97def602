use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::frames::Frame;
use crate::utils::validate_identifier;

pub mod sea_orm_storage;

/// Equality condition on one integer column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EqCondition {
    pub column: String,
    pub value: i64,
}

/// A read of one source table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableQuery {
    pub table: String,
    /// `None` selects every column
    pub columns: Option<Vec<String>>,
    pub condition: Option<EqCondition>,
}

impl TableQuery {
    /// `SELECT * FROM table`
    pub fn all(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            condition: None,
        }
    }

    /// `SELECT column FROM table`
    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Some(vec![column.into()]),
            condition: None,
        }
    }

    /// Adds `WHERE column = value`
    pub fn where_eq(mut self, column: impl Into<String>, value: i64) -> Self {
        self.condition = Some(EqCondition {
            column: column.into(),
            value,
        });
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.table)?;
        if let Some(columns) = &self.columns {
            for column in columns {
                validate_identifier(column)?;
            }
        }
        if let Some(condition) = &self.condition {
            validate_identifier(&condition.column)?;
        }
        Ok(())
    }

    /// Stable key for the frame cache
    pub fn cache_key(&self) -> String {
        let columns = self
            .columns
            .as_ref()
            .map(|c| c.join(","))
            .unwrap_or_else(|| "*".to_string());
        match &self.condition {
            Some(cond) => format!("frame:{}:{}:{}={}", self.table, columns, cond.column, cond.value),
            None => format!("frame:{}:{}", self.table, columns),
        }
    }
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Loads a table into a frame
    async fn load_table(&self, query: &TableQuery) -> Result<Frame>;
    /// Loads a single column of a table
    async fn load_column(&self, table: &str, column: &str) -> Result<Frame> {
        self.load_table(&TableQuery::column(table, column)).await
    }
    /// Checks that the database answers
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_distinguishes_conditions() {
        let all = TableQuery::all("tvet15m");
        let graduated = TableQuery::all("tvet15m").where_eq("scholarship_status", 8);
        assert_eq!(all.cache_key(), "frame:tvet15m:*");
        assert_eq!(
            graduated.cache_key(),
            "frame:tvet15m:*:scholarship_status=8"
        );
        assert_eq!(
            TableQuery::column("tvet15m_data", "province_name").cache_key(),
            "frame:tvet15m_data:province_name"
        );
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert!(TableQuery::all("school_staff").where_eq("is_teaching", 1).validate().is_ok());
        assert!(TableQuery::all("school staff").validate().is_err());
        assert!(TableQuery::column("t", "a;b").validate().is_err());
        assert!(TableQuery::all("t").where_eq("1=1 --", 1).validate().is_err());
    }
}
