//! Derived columns computed after a table load.

use chrono::{Datelike, NaiveDate};
use serde_json::{Value, json};

use crate::models::frames::{Frame, values};

pub const AGE_COLUMN: &str = "age";
pub const BIRTH_DATE_COLUMN: &str = "date_of_birth";

/// Lower bound of the first income bin, in dollars
pub const INCOME_BIN_START: i64 = 50;
/// Upper (exclusive) bound of the last income bin
pub const INCOME_BIN_END: i64 = 1550;
pub const INCOME_BIN_WIDTH: i64 = 50;

/// Adds `age` as the difference of calendar years; unparseable dates give 0.
/// Frames without a birth date column are left unchanged.
pub fn add_calendar_age(frame: &mut Frame, today: NaiveDate) {
    if !frame.has_column(BIRTH_DATE_COLUMN) {
        return;
    }
    frame.add_column(AGE_COLUMN, |row| {
        let age = row
            .date(BIRTH_DATE_COLUMN)
            .map(|born| i64::from(today.year() - born.year()))
            .unwrap_or(0);
        json!(age)
    });
}

/// Whole years elapsed since `born`, counted as days / 365
pub fn elapsed_years(born: NaiveDate, today: NaiveDate) -> i64 {
    (today - born).num_days().div_euclid(365)
}

/// Adds `age` in elapsed years; rows with an unparseable birth date get null
pub fn add_elapsed_age(frame: &mut Frame, today: NaiveDate) {
    if !frame.has_column(BIRTH_DATE_COLUMN) {
        return;
    }
    frame.add_column(AGE_COLUMN, |row| {
        row.date(BIRTH_DATE_COLUMN)
            .map_or(Value::Null, |born| json!(elapsed_years(born, today)))
    });
}

/// Rewrites a date column so zero dates, nulls and bad values become `fallback`
pub fn normalize_dates(frame: &mut Frame, column: &str, fallback: NaiveDate) {
    if !frame.has_column(column) {
        return;
    }
    frame.add_column(column, |row| {
        let dt = row
            .get(column)
            .and_then(values::as_datetime)
            .unwrap_or_else(|| fallback.and_time(chrono::NaiveTime::default()));
        json!(dt.format("%Y-%m-%d %H:%M:%S").to_string())
    });
}

/// Labels of the income bins in ascending order: "50-99", "100-149", ...
pub fn income_bin_labels() -> Vec<String> {
    (INCOME_BIN_START..INCOME_BIN_END)
        .step_by(INCOME_BIN_WIDTH as usize)
        .map(|lower| format!("{}-{}", lower, lower + INCOME_BIN_WIDTH - 1))
        .collect()
}

/// Index of the left-closed bin holding `income`, `None` outside all bins
pub fn income_bin(income: f64) -> Option<usize> {
    if !income.is_finite()
        || income < INCOME_BIN_START as f64
        || income >= INCOME_BIN_END as f64
    {
        return None;
    }
    Some(((income - INCOME_BIN_START as f64) / INCOME_BIN_WIDTH as f64).floor() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn births() -> Frame {
        Frame::from_rows(
            vec!["id".into(), BIRTH_DATE_COLUMN.into()],
            vec![
                vec![json!(1), json!("2000-12-31")],
                vec![json!(2), json!("garbage")],
                vec![json!(3), Value::Null],
            ],
        )
    }

    #[test]
    fn test_calendar_age() {
        let mut frame = births();
        add_calendar_age(&mut frame, date(2024, 1, 1));
        let ages: Vec<_> = frame.iter().map(|r| r.int(AGE_COLUMN)).collect();
        assert_eq!(ages, vec![Some(24), Some(0), Some(0)]);
    }

    #[test]
    fn test_elapsed_age() {
        let mut frame = births();
        add_elapsed_age(&mut frame, date(2024, 1, 1));
        let ages: Vec<_> = frame.iter().map(|r| r.int(AGE_COLUMN)).collect();
        assert_eq!(ages, vec![Some(23), None, None]);
        assert_eq!(elapsed_years(date(2000, 1, 1), date(2000, 12, 31)), 0);
    }

    #[test]
    fn test_calendar_age_without_column() {
        let mut frame = Frame::from_rows(vec!["id".into()], vec![vec![json!(1)]]);
        add_calendar_age(&mut frame, date(2024, 1, 1));
        assert!(!frame.has_column(AGE_COLUMN));
    }

    #[test]
    fn test_normalize_dates() {
        let mut frame = Frame::from_rows(
            vec!["start_work_at".into()],
            vec![
                vec![json!("0000-00-00 00:00:00")],
                vec![Value::Null],
                vec![json!("2019-06-01 07:00:00")],
            ],
        );
        normalize_dates(&mut frame, "start_work_at", date(1970, 1, 1));
        let dates: Vec<_> = frame.iter().map(|r| r.date("start_work_at")).collect();
        assert_eq!(
            dates,
            vec![Some(date(1970, 1, 1)), Some(date(1970, 1, 1)), Some(date(2019, 6, 1))]
        );
    }

    #[test]
    fn test_income_bins() {
        let labels = income_bin_labels();
        assert_eq!(labels.len(), 30);
        assert_eq!(labels[0], "50-99");
        assert_eq!(labels[29], "1500-1549");

        assert_eq!(income_bin(49.99), None);
        assert_eq!(income_bin(50.0), Some(0));
        assert_eq!(income_bin(99.99), Some(0));
        assert_eq!(income_bin(100.0), Some(1));
        assert_eq!(income_bin(1549.0), Some(29));
        assert_eq!(income_bin(1550.0), None);
    }
}
