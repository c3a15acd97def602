//! Grouping, counting and KPI formatting over frames.

use std::collections::{BTreeMap, HashMap};

use crate::models::frames::{Frame, RowRef};

/// Counts of non-null values, descending by count then ascending by label
pub fn value_counts(frame: &Frame, column: &str) -> Vec<(String, u64)> {
    value_counts_by(frame, |row| row.text(column))
}

/// Counts of the keys produced per row; rows yielding `None` are skipped
pub fn value_counts_by<F>(frame: &Frame, mut key: F) -> Vec<(String, u64)>
where
    F: FnMut(RowRef<'_>) -> Option<String>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for row in frame.iter() {
        if let Some(k) = key(row) {
            *counts.entry(k).or_default() += 1;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Counts per `(x, series)` pair, ordered by x then series
pub fn group_counts_by<X, S, F>(frame: &Frame, mut key: F) -> Vec<(X, S, u64)>
where
    X: Ord,
    S: Ord,
    F: FnMut(RowRef<'_>) -> Option<(X, S)>,
{
    let mut counts: BTreeMap<(X, S), u64> = BTreeMap::new();
    for row in frame.iter() {
        if let Some(k) = key(row) {
            *counts.entry(k).or_default() += 1;
        }
    }
    counts.into_iter().map(|((x, s), n)| (x, s, n)).collect()
}

/// Counts per pair of non-null text values of two columns
pub fn group_counts(frame: &Frame, x: &str, series: &str) -> Vec<(String, String, u64)> {
    group_counts_by(frame, |row| Some((row.text(x)?, row.text(series)?)))
}

/// Counts for every combination of the two domains, in domain order,
/// with absent combinations counted as zero
pub fn group_counts_complete<F>(
    frame: &Frame,
    x_domain: &[&str],
    series_domain: &[&str],
    key: F,
) -> Vec<(String, String, u64)>
where
    F: FnMut(RowRef<'_>) -> Option<(String, String)>,
{
    let counts: HashMap<(String, String), u64> =
        group_counts_by(frame, key)
            .into_iter()
            .map(|(x, s, n)| ((x, s), n))
            .collect();

    x_domain
        .iter()
        .flat_map(|x| series_domain.iter().map(move |s| (*x, *s)))
        .map(|(x, s)| {
            let n = counts
                .get(&(x.to_string(), s.to_string()))
                .copied()
                .unwrap_or(0);
            (x.to_string(), s.to_string(), n)
        })
        .collect()
}

pub fn count_where<F>(frame: &Frame, mut predicate: F) -> u64
where
    F: FnMut(RowRef<'_>) -> bool,
{
    frame.iter().filter(|row| predicate(*row)).count() as u64
}

/// Rows whose column reads as the integer `value`
pub fn count_eq_int(frame: &Frame, column: &str, value: i64) -> u64 {
    count_where(frame, |row| row.int(column) == Some(value))
}

/// Rows whose column equals `value` as text
pub fn count_eq_text(frame: &Frame, column: &str, value: &str) -> u64 {
    count_where(frame, |row| row.text(column).as_deref() == Some(value))
}

/// Integer part of the arithmetic mean, 0 for no values
pub fn mean_floor<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0i128, 0i128), |(sum, n), v| (sum + i128::from(v), n + 1));
    if n == 0 { 0 } else { (sum / n) as i64 }
}

/// Most frequent non-null value
pub fn mode(frame: &Frame, column: &str) -> Option<String> {
    value_counts(frame, column).into_iter().next().map(|(v, _)| v)
}

/// `part / total * 100`, 0 when total is 0
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// "50%" for whole numbers, two decimals otherwise
pub fn format_percentage(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}%", percent as i64)
    } else {
        format!("{percent:.2}%")
    }
}

/// Percentage rounded to a whole number
pub fn format_whole_percentage(percent: f64) -> String {
    format!("{percent:.0}%")
}

/// Thousands separated with commas
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
