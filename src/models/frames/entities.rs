use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use ts_rs::TS;

use super::values;

/// An in-memory loaded table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/frame.ts")]
pub struct Frame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Borrowed view over one row of a [`Frame`]
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RowRef<'a> {
    /// Raw cell, `None` when the column is missing
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }

    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(values::as_text)
    }

    pub fn int(&self, column: &str) -> Option<i64> {
        self.get(column).and_then(values::as_i64)
    }

    pub fn float(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(values::as_f64)
    }

    pub fn date(&self, column: &str) -> Option<chrono::NaiveDate> {
        self.get(column).and_then(values::as_date)
    }

    pub fn is_null(&self, column: &str) -> bool {
        self.get(column).is_none_or(Value::is_null)
    }
}

impl Frame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a frame, padding or truncating rows to the column count
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(|values| RowRef {
            columns: &self.columns,
            values,
        })
    }

    /// Non-null cells of one column; empty when the column is missing
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a Value> + 'a {
        let idx = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
            .filter(|v| !v.is_null())
    }

    /// Replaces nulls in `column` with `value`; a missing column is left alone
    pub fn fill_null(&mut self, column: &str, value: Value) {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            if row[idx].is_null() {
                row[idx] = value.clone();
            }
        }
    }

    /// Keeps the rows matching `predicate`
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(RowRef<'_>) -> bool,
    {
        let columns = &self.columns;
        self.rows.retain(|values| predicate(RowRef { columns, values }));
    }

    /// Copy of the rows matching `predicate`
    pub fn filtered<F>(&self, mut predicate: F) -> Frame
    where
        F: FnMut(RowRef<'_>) -> bool,
    {
        let rows = self
            .iter()
            .filter(|row| predicate(*row))
            .map(|row| row.values.to_vec())
            .collect();
        Frame {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Adds or replaces a column computed from each row
    pub fn add_column<F>(&mut self, name: &str, mut compute: F)
    where
        F: FnMut(RowRef<'_>) -> Value,
    {
        let computed: Vec<Value> = self.iter().map(&mut compute).collect();
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(computed) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(computed) {
                    row.push(value);
                }
            }
        }
    }

    /// Unique non-null values as text, sorted ascending
    pub fn distinct_sorted(&self, column: &str) -> Vec<String> {
        self.column_values(column)
            .filter_map(values::as_text)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// True when the column is missing or holds only nulls
    pub fn all_null(&self, column: &str) -> bool {
        self.column_values(column).next().is_none()
    }

    /// Rows `[start, end)` clamped to the frame
    pub fn slice(&self, start: usize, end: usize) -> &[Vec<Value>] {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        &self.rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Frame {
        Frame::from_rows(
            vec!["gender".into(), "province".into(), "status".into()],
            vec![
                vec![json!("male"), json!("Kandal"), json!(1)],
                vec![json!("female"), json!("Takeo"), json!(0)],
                vec![Value::Null, json!("Kandal"), json!(1)],
            ],
        )
    }

    #[test]
    fn test_fill_null() {
        let mut frame = sample();
        frame.fill_null("gender", json!("Unknown"));
        frame.fill_null("missing", json!("x"));
        assert_eq!(frame.distinct_sorted("gender"), vec!["Unknown", "female", "male"]);
        assert!(!frame.has_column("missing"));
    }

    #[test]
    fn test_retain_and_filtered() {
        let mut frame = sample();
        let active = frame.filtered(|row| row.int("status") == Some(1));
        assert_eq!(active.len(), 2);

        frame.retain(|row| row.text("province").as_deref() == Some("Takeo"));
        assert_eq!(frame.len(), 1);
        assert_eq!(frame.iter().next().and_then(|r| r.text("gender")), Some("female".into()));
    }

    #[test]
    fn test_add_column_appends_and_replaces() {
        let mut frame = sample();
        frame.add_column("double", |row| json!(row.int("status").unwrap_or(0) * 2));
        assert_eq!(frame.columns.len(), 4);
        assert_eq!(frame.rows[0][3], json!(2));

        frame.add_column("status", |_| json!(7));
        assert_eq!(frame.columns.len(), 4);
        assert!(frame.iter().all(|row| row.int("status") == Some(7)));
    }

    #[test]
    fn test_all_null() {
        let frame = Frame::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![Value::Null, json!(1)], vec![Value::Null]],
        );
        assert!(frame.all_null("a"));
        assert!(!frame.all_null("b"));
        assert!(frame.all_null("c"));
        assert_eq!(frame.rows[1].len(), 2);
    }

    #[test]
    fn test_slice_is_clamped() {
        let frame = sample();
        assert_eq!(frame.slice(1, 10).len(), 2);
        assert!(frame.slice(5, 10).is_empty());
    }
}
