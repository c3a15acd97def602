//! Builders turning aggregates into chart descriptions.

use std::collections::BTreeMap;

use serde_json::json;

use super::{aggregate, derive, labels};
use crate::models::charts::{
    BarMode, BarSeries, CategoryOrder, ChartSpec, LineSeries, Orientation, PieSlice, Point,
    ScatterPoint,
};
use crate::models::frames::Frame;

pub const PIE: f64 = 0.0;
pub const DONUT: f64 = 0.5;

pub const PLACEHOLDER_MESSAGE: &str = "Data Unavailable";

/// How many categories a counts bar keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Head {
    #[default]
    All,
    /// The n largest counts
    Largest(usize),
    /// The first n after sorting ascending
    Smallest(usize),
}

#[derive(Debug, Clone)]
pub struct BarOptions {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub head: Head,
    pub ascending: bool,
    pub orientation: Orientation,
}

impl BarOptions {
    pub fn new(x_label: &'static str, y_label: &'static str) -> Self {
        Self {
            x_label,
            y_label,
            head: Head::All,
            ascending: true,
            orientation: Orientation::Vertical,
        }
    }

    pub fn head(mut self, head: Head) -> Self {
        self.head = head;
        self
    }

    pub fn descending(mut self) -> Self {
        self.ascending = false;
        self
    }

    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }
}

pub fn placeholder() -> ChartSpec {
    ChartSpec::Placeholder {
        message: PLACEHOLDER_MESSAGE.to_string(),
    }
}

/// Pie of precomputed counts
pub fn counts_pie(counts: Vec<(String, u64)>, hole: f64) -> ChartSpec {
    ChartSpec::Pie {
        hole,
        slices: counts
            .into_iter()
            .map(|(label, value)| PieSlice {
                label,
                value,
                color: None,
            })
            .collect(),
    }
}

/// Gender share with Khmer labels and the fixed gender colours
pub fn gender_pie(frame: &Frame, column: &str, hole: f64) -> ChartSpec {
    let slices = aggregate::value_counts(frame, column)
        .into_iter()
        .map(|(gender, value)| PieSlice {
            label: labels::gender_label(&gender),
            color: labels::gender_color(&gender),
            value,
        })
        .collect();
    ChartSpec::Pie { hole, slices }
}

/// Donut of integer codes mapped through `table`; unmapped codes are dropped.
/// Placeholder when the column is missing or holds only nulls.
pub fn status_donut(frame: &Frame, column: &str, table: &[(i64, &'static str)]) -> ChartSpec {
    if frame.all_null(column) {
        return placeholder();
    }
    let counts = aggregate::value_counts_by(frame, |row| {
        row.int(column)
            .and_then(|code| labels::lookup(table, code))
            .map(str::to_string)
    });
    counts_pie(counts, DONUT)
}

/// Bar of category counts
pub fn counts_bar(counts: Vec<(String, u64)>, options: &BarOptions) -> ChartSpec {
    let mut counts = counts;
    match options.head {
        Head::All => {}
        Head::Largest(n) => counts.truncate(n),
        Head::Smallest(n) => {
            counts.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            counts.truncate(n);
        }
    }
    if options.ascending {
        counts.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    }

    let (categories, values): (Vec<String>, Vec<u64>) = counts.into_iter().unzip();
    ChartSpec::Bar {
        orientation: options.orientation,
        x_label: options.x_label.to_string(),
        y_label: options.y_label.to_string(),
        categories,
        series: vec![BarSeries {
            name: options.y_label.to_string(),
            values,
            color: None,
        }],
        barmode: BarMode::Single,
        category_order: if options.ascending {
            CategoryOrder::TotalAscending
        } else {
            CategoryOrder::Given
        },
    }
}

/// Counts bar over one column, placeholder when the column is missing
pub fn column_bar(frame: &Frame, column: &str, options: &BarOptions) -> ChartSpec {
    if frame.all_null(column) {
        return placeholder();
    }
    counts_bar(aggregate::value_counts(frame, column), options)
}

/// Grouped bar from `(category, series, count)` triples.
/// Categories and series keep their first-seen order; `series_label` renames series.
pub fn grouped_bar<F>(
    groups: Vec<(String, String, u64)>,
    x_label: &str,
    y_label: &str,
    series_label: F,
) -> ChartSpec
where
    F: Fn(&str) -> String,
{
    let mut categories: Vec<String> = Vec::new();
    let mut series_keys: Vec<String> = Vec::new();
    for (x, s, _) in &groups {
        if !categories.contains(x) {
            categories.push(x.clone());
        }
        if !series_keys.contains(s) {
            series_keys.push(s.clone());
        }
    }

    let series = series_keys
        .iter()
        .map(|key| {
            let values = categories
                .iter()
                .map(|x| {
                    groups
                        .iter()
                        .find(|(gx, gs, _)| gx == x && gs == key)
                        .map_or(0, |(_, _, n)| *n)
                })
                .collect();
            BarSeries {
                name: series_label(key),
                values,
                color: labels::gender_color(key),
            }
        })
        .collect();

    ChartSpec::Bar {
        orientation: Orientation::Vertical,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        categories,
        series,
        barmode: BarMode::Group,
        category_order: CategoryOrder::Given,
    }
}

/// Line per series from `(x, series, count)` triples, points ascending by x
pub fn series_line<F>(
    groups: Vec<(i64, String, u64)>,
    x_label: &str,
    y_label: &str,
    series_label: F,
) -> ChartSpec
where
    F: Fn(&str) -> String,
{
    let mut by_series: BTreeMap<String, Vec<Point>> = BTreeMap::new();
    for (x, s, n) in groups {
        by_series
            .entry(s)
            .or_default()
            .push(Point { x: json!(x), y: n });
    }

    let series = by_series
        .into_iter()
        .map(|(key, mut points)| {
            points.sort_by_key(|p| p.x.as_i64().unwrap_or_default());
            LineSeries {
                name: series_label(&key),
                color: labels::gender_color(&key),
                points,
            }
        })
        .collect();

    ChartSpec::Line {
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        series,
        markers: false,
    }
}

/// Age distribution split by gender, Khmer gender names as series
pub fn age_line(frame: &Frame, age_column: &str, gender_column: &str, y_label: &str) -> ChartSpec {
    let groups = aggregate::group_counts_by(frame, |row| {
        Some((row.int(age_column)?, row.text(gender_column)?))
    });
    series_line(groups, "អាយុ", y_label, labels::gender_label)
}

/// Scatter of how many rows share each numeric value, sized by that count
pub fn counts_scatter(frame: &Frame, column: &str, x_label: &str, y_label: &str) -> ChartSpec {
    if frame.all_null(column) {
        return placeholder();
    }
    // keyed by the value scaled to micro units so equal floats group together
    let mut counts: BTreeMap<i64, (f64, u64)> = BTreeMap::new();
    for value in frame.iter().filter_map(|row| row.float(column)) {
        let key = (value * 1_000_000.0).round() as i64;
        counts.entry(key).or_insert((value, 0)).1 += 1;
    }
    ChartSpec::Scatter {
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points: counts
            .into_values()
            .map(|(x, n)| ScatterPoint { x, y: n, size: n })
            .collect(),
    }
}

/// Trainees per income bin, every bin present even when empty
pub fn income_line(frame: &Frame, column: &str, y_label: &str) -> ChartSpec {
    let labels = derive::income_bin_labels();
    let mut counts = vec![0u64; labels.len()];
    for bin in frame
        .iter()
        .filter_map(|row| row.float(column))
        .filter_map(derive::income_bin)
    {
        counts[bin] += 1;
    }

    let points = labels
        .into_iter()
        .zip(counts)
        .map(|(label, n)| Point { x: json!(label), y: n })
        .collect();

    ChartSpec::Line {
        x_label: "ចន្លោះប្រាក់ចំណូល ($)".to_string(),
        y_label: y_label.to_string(),
        series: vec![LineSeries {
            name: y_label.to_string(),
            points,
            color: Some("#0077b3".to_string()),
        }],
        markers: true,
    }
}

/// Filled area of category counts, ascending left to right
pub fn area(counts: Vec<(String, u64)>, x_label: &str, y_label: &str) -> ChartSpec {
    let mut counts = counts;
    counts.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    ChartSpec::Area {
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points: counts
            .into_iter()
            .map(|(x, y)| Point { x: json!(x), y })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn frame() -> Frame {
        Frame::from_rows(
            vec!["gender".into(), "age".into(), "status".into(), "income".into()],
            vec![
                vec![json!("male"), json!(20), json!(1), json!(75)],
                vec![json!("female"), json!(20), json!(1), json!("120")],
                vec![json!("female"), json!(22), json!(8), json!(10)],
                vec![json!("female"), json!(21), json!(42), Value::Null],
            ],
        )
    }

    #[test]
    fn test_gender_pie() {
        let ChartSpec::Pie { hole, slices } = gender_pie(&frame(), "gender", PIE) else {
            panic!("expected pie");
        };
        assert_eq!(hole, 0.0);
        assert_eq!(slices[0].label, "ស្រី");
        assert_eq!(slices[0].value, 3);
        assert_eq!(slices[0].color.as_deref(), Some("#0077b3"));
        assert_eq!(slices[1].label, "ប្រុស");
    }

    #[test]
    fn test_status_donut_drops_unmapped() {
        let ChartSpec::Pie { hole, slices } =
            status_donut(&frame(), "status", &labels::SCHOLARSHIP_STATUS)
        else {
            panic!("expected donut");
        };
        assert_eq!(hole, DONUT);
        let total: u64 = slices.iter().map(|s| s.value).sum();
        assert_eq!(total, 3);
        assert!(status_donut(&frame(), "missing", &labels::SCHOLARSHIP_STATUS).is_placeholder());
    }

    #[test]
    fn test_counts_bar_heads() {
        let counts = vec![
            ("a".to_string(), 9),
            ("b".to_string(), 5),
            ("c".to_string(), 3),
            ("d".to_string(), 1),
        ];

        let largest = counts_bar(
            counts.clone(),
            &BarOptions::new("x", "y").head(Head::Largest(2)),
        );
        let ChartSpec::Bar { categories, .. } = largest else {
            panic!("expected bar");
        };
        assert_eq!(categories, vec!["b", "a"]);

        let smallest = counts_bar(counts, &BarOptions::new("x", "y").head(Head::Smallest(2)));
        let ChartSpec::Bar { categories, series, .. } = smallest else {
            panic!("expected bar");
        };
        assert_eq!(categories, vec!["d", "c"]);
        assert_eq!(series[0].values, vec![1, 3]);
    }

    #[test]
    fn test_grouped_bar_fills_gaps() {
        let groups = vec![
            ("day".to_string(), "female".to_string(), 4),
            ("day".to_string(), "male".to_string(), 2),
            ("night".to_string(), "male".to_string(), 1),
        ];
        let ChartSpec::Bar { categories, series, barmode, .. } =
            grouped_bar(groups, "x", "y", labels::gender_label)
        else {
            panic!("expected bar");
        };
        assert_eq!(barmode, BarMode::Group);
        assert_eq!(categories, vec!["day", "night"]);
        assert_eq!(series[0].name, "ស្រី");
        assert_eq!(series[0].values, vec![4, 0]);
        assert_eq!(series[1].values, vec![2, 1]);
    }

    #[test]
    fn test_age_line() {
        let ChartSpec::Line { series, .. } = age_line(&frame(), "age", "gender", "count") else {
            panic!("expected line");
        };
        assert_eq!(series.len(), 2);
        let female = series.iter().find(|s| s.name == "ស្រី").unwrap();
        let xs: Vec<i64> = female.points.iter().filter_map(|p| p.x.as_i64()).collect();
        assert_eq!(xs, vec![20, 21, 22]);
    }

    #[test]
    fn test_income_line_bins() {
        let ChartSpec::Line { series, markers, .. } = income_line(&frame(), "income", "count")
        else {
            panic!("expected line");
        };
        assert!(markers);
        let points = &series[0].points;
        assert_eq!(points.len(), 30);
        assert_eq!(points[0].x, json!("50-99"));
        assert_eq!(points[0].y, 1);
        assert_eq!(points[1].y, 1);
        assert_eq!(points.iter().map(|p| p.y).sum::<u64>(), 2);
    }

    #[test]
    fn test_scatter_and_area() {
        let ChartSpec::Scatter { points, .. } = counts_scatter(&frame(), "age", "x", "y") else {
            panic!("expected scatter");
        };
        assert_eq!(points[0], ScatterPoint { x: 20.0, y: 2, size: 2 });

        let ChartSpec::Area { points, .. } =
            area(vec![("IT".into(), 5), ("Civil".into(), 2)], "x", "y")
        else {
            panic!("expected area");
        };
        assert_eq!(points[0].x, json!("Civil"));
    }
}
