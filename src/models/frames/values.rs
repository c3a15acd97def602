//! Lenient coercion of loaded cell values.
//!
//! Anything that cannot be read as the requested type becomes `None`,
//! the same way a coercing parse turns bad input into a missing value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Textual form of a cell, `None` for null
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(format_float)
            }
        }
        other => Some(other.to_string()),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Integer form: integers, integral floats and numeric strings
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// Float form: numbers and numeric strings
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Timestamp form, accepts dates, `YYYY-MM-DD HH:MM:SS`, ISO and RFC 3339 strings
pub fn as_datetime(value: &Value) -> Option<NaiveDateTime> {
    let Value::String(raw) = value else {
        return None;
    };
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with("0000-00-00") {
        return None;
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Date part of [`as_datetime`]
pub fn as_date(value: &Value) -> Option<NaiveDate> {
    as_datetime(value).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(&json!("Kandal")), Some("Kandal".to_string()));
        assert_eq!(as_text(&json!(1)), Some("1".to_string()));
        assert_eq!(as_text(&json!(2.0)), Some("2".to_string()));
        assert_eq!(as_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(as_text(&Value::Null), None);
    }

    #[test]
    fn test_as_i64_coerces() {
        assert_eq!(as_i64(&json!(8)), Some(8));
        assert_eq!(as_i64(&json!("8")), Some(8));
        assert_eq!(as_i64(&json!("8.0")), Some(8));
        assert_eq!(as_i64(&json!(8.5)), None);
        assert_eq!(as_i64(&json!("graduated")), None);
        assert_eq!(as_i64(&Value::Null), None);
    }

    #[test]
    fn test_as_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2001, 4, 12);
        assert_eq!(as_date(&json!("2001-04-12")), expected);
        assert_eq!(as_date(&json!("2001-04-12 08:30:00")), expected);
        assert_eq!(as_date(&json!("2001-04-12T08:30:00")), expected);
        assert_eq!(as_date(&json!("2001-04-12T08:30:00+07:00")), expected);
        // keeps the written date instead of shifting to UTC
        assert_eq!(as_date(&json!("2001-04-12T02:00:00+07:00")), expected);
        assert_eq!(as_date(&json!("0000-00-00 00:00:00")), None);
        assert_eq!(as_date(&json!("not a date")), None);
        assert_eq!(as_date(&json!(20010412)), None);
    }
}
