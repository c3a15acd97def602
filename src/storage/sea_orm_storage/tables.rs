use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, JsonValue, Statement};
use serde_json::Value;
use tracing::debug;

use super::SeaOrmStorage;
use crate::errors::{DashboardError, Result};
use crate::models::frames::Frame;
use crate::storage::TableQuery;

/// Quotes an already validated identifier for the backend
fn quote(backend: DbBackend, ident: &str) -> String {
    match backend {
        DbBackend::MySql => format!("`{ident}`"),
        _ => format!("\"{ident}\""),
    }
}

fn placeholder(backend: DbBackend, index: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${index}"),
        _ => "?".to_string(),
    }
}

/// Renders the SELECT for a validated query
pub(crate) fn build_select(backend: DbBackend, query: &TableQuery) -> Statement {
    let projection = match &query.columns {
        Some(columns) if !columns.is_empty() => columns
            .iter()
            .map(|c| quote(backend, c))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "*".to_string(),
    };
    let mut sql = format!("SELECT {projection} FROM {}", quote(backend, &query.table));

    match &query.condition {
        Some(cond) => {
            sql.push_str(&format!(
                " WHERE {} = {}",
                quote(backend, &cond.column),
                placeholder(backend, 1)
            ));
            Statement::from_sql_and_values(backend, sql, [cond.value.into()])
        }
        None => Statement::from_string(backend, sql),
    }
}

/// Row objects to a frame; columns keep the order of first appearance
fn records_to_frame(records: Vec<JsonValue>, requested: Option<&Vec<String>>) -> Frame {
    let mut columns: Vec<String> = requested.cloned().unwrap_or_default();
    for record in &records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let rows = records
        .into_iter()
        .map(|record| match record {
            Value::Object(mut map) => columns
                .iter()
                .map(|c| map.remove(c).unwrap_or(Value::Null))
                .collect(),
            _ => vec![Value::Null; columns.len()],
        })
        .collect();

    Frame::from_rows(columns, rows)
}

impl SeaOrmStorage {
    pub async fn load_table_impl(&self, query: &TableQuery) -> Result<Frame> {
        query.validate()?;
        let backend = self.db.get_database_backend();
        let stmt = build_select(backend, query);
        debug!("Loading table: {}", stmt.sql);

        let records = JsonValue::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| DashboardError::data_load(e.to_string()))?;

        let frame = records_to_frame(records, query.columns.as_ref());
        debug!(
            "Loaded {} rows x {} columns from {}",
            frame.len(),
            frame.column_names().len(),
            query.table
        );
        Ok(frame)
    }

    pub async fn ping_impl(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| DashboardError::database_connection(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use sea_orm::Database;
    use serde_json::json;

    async fn storage_with_staff() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE school_staff (
                id INTEGER PRIMARY KEY,
                name TEXT,
                gender TEXT,
                is_teaching INTEGER
            )",
        )
        .await
        .unwrap();
        db.execute_unprepared(
            "INSERT INTO school_staff (id, name, gender, is_teaching) VALUES
                (1, 'Dara', 'male', 1),
                (2, 'Sokha', NULL, 0),
                (3, 'Chanthy', 'female', 1);",
        )
        .await
        .unwrap();
        SeaOrmStorage::from_connection(db)
    }

    #[test]
    fn test_build_select_quotes_per_backend() {
        let query = TableQuery::all("school_staff").where_eq("is_teaching", 1);

        let mysql = build_select(DbBackend::MySql, &query);
        assert_eq!(mysql.sql, "SELECT * FROM `school_staff` WHERE `is_teaching` = ?");

        let pg = build_select(DbBackend::Postgres, &query);
        assert_eq!(
            pg.sql,
            "SELECT * FROM \"school_staff\" WHERE \"is_teaching\" = $1"
        );

        let column = build_select(
            DbBackend::Sqlite,
            &TableQuery::column("tvet15m_data", "province_name"),
        );
        assert_eq!(
            column.sql,
            "SELECT \"province_name\" FROM \"tvet15m_data\""
        );
    }

    #[test]
    fn test_records_to_frame_pads_missing_keys() {
        let records = vec![json!({"a": 1, "b": "x"}), json!({"a": 2})];
        let frame = records_to_frame(records, None);
        assert_eq!(frame.column_names(), ["a", "b"]);
        assert_eq!(frame.rows[1], vec![json!(2), Value::Null]);
    }

    #[tokio::test]
    async fn test_load_table_reads_rows_in_column_order() {
        let storage = storage_with_staff().await;
        let frame = storage
            .load_table(&TableQuery::all("school_staff"))
            .await
            .unwrap();

        assert_eq!(frame.column_names(), ["id", "name", "gender", "is_teaching"]);
        assert_eq!(frame.len(), 3);
        assert!(frame.iter().nth(1).unwrap().is_null("gender"));
    }

    #[tokio::test]
    async fn test_load_table_with_condition() {
        let storage = storage_with_staff().await;
        let frame = storage
            .load_table(&TableQuery::all("school_staff").where_eq("is_teaching", 1))
            .await
            .unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.distinct_sorted("name"), vec!["Chanthy", "Dara"]);
    }

    #[tokio::test]
    async fn test_load_column_and_errors() {
        let storage = storage_with_staff().await;
        let frame = storage.load_column("school_staff", "gender").await.unwrap();
        assert_eq!(frame.column_names(), ["gender"]);

        let missing = storage.load_table(&TableQuery::all("nope")).await;
        assert_eq!(missing.unwrap_err().code(), "E011");

        let invalid = storage.load_table(&TableQuery::all("bad name")).await;
        assert_eq!(invalid.unwrap_err().code(), "E007");

        assert!(storage.ping().await.is_ok());
    }
}
