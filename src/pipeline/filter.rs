//! Filter cascade: date range first, then the multi-select filters in order.

use chrono::NaiveDate;

use super::labels;
use crate::models::filters::{DateBounds, FilterOption, FilterPanel, FilterSelection, FilterState};
use crate::models::frames::Frame;

pub const INVALID_DATE_RANGE: &str =
    "⚠️ កាលបរិច្ឆេទចាប់ផ្ដើមត្រូវតែតិចជាងកាលបរិច្ឆេទបញ្ចប់។ សូមជ្រើសរើសម្តងទៀត។";

/// Where a filter takes its options from
#[derive(Debug, Clone, Copy)]
pub enum OptionSource {
    /// Values of the unfiltered frame
    Full,
    /// Values left after the earlier filters
    Cascaded,
    /// Fixed `(value, label)` dictionary
    Dictionary(&'static [(&'static str, &'static str)]),
}

/// How option values are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSet {
    Raw,
    /// Khmer gender labels; `mapped_only` drops values without one
    Gender { mapped_only: bool },
    Province,
}

#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub column: &'static str,
    pub options: OptionSource,
    pub labels: LabelSet,
    /// Warning raised when the filter has no options at all
    pub empty_warning: Option<&'static str>,
}

impl FilterSpec {
    pub fn full(key: &'static str, label: &'static str, column: &'static str) -> Self {
        Self {
            key,
            label,
            column,
            options: OptionSource::Full,
            labels: LabelSet::Raw,
            empty_warning: None,
        }
    }

    pub fn cascaded(key: &'static str, label: &'static str, column: &'static str) -> Self {
        Self {
            options: OptionSource::Cascaded,
            ..Self::full(key, label, column)
        }
    }

    pub fn dictionary(
        key: &'static str,
        label: &'static str,
        column: &'static str,
        entries: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            options: OptionSource::Dictionary(entries),
            ..Self::full(key, label, column)
        }
    }

    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    pub fn warn_when_empty(mut self, warning: &'static str) -> Self {
        self.empty_warning = Some(warning);
        self
    }

    fn label_for(&self, value: &str) -> String {
        match self.labels {
            LabelSet::Raw => value.to_string(),
            LabelSet::Gender { .. } => labels::gender_label(value),
            LabelSet::Province => labels::province_label(value),
        }
    }

    fn build_options(&self, full: &Frame, cascaded: &Frame) -> Vec<FilterOption> {
        let source = match self.options {
            OptionSource::Dictionary(entries) => {
                return entries
                    .iter()
                    .map(|(value, label)| FilterOption {
                        value: value.to_string(),
                        label: label.to_string(),
                    })
                    .collect();
            }
            OptionSource::Full => full,
            OptionSource::Cascaded => cascaded,
        };

        source
            .distinct_sorted(self.column)
            .into_iter()
            .filter(|value| match self.labels {
                LabelSet::Gender { mapped_only: true } => labels::gender_khmer(value).is_some(),
                _ => true,
            })
            .map(|value| FilterOption {
                label: self.label_for(&value),
                value,
            })
            .collect()
    }
}

/// What happens when the selected date range leaves no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEmptyPolicy {
    /// Keep the empty result
    Apply,
    /// Fall back to the frame before the date filter
    Ignore,
}

#[derive(Debug, Clone)]
pub struct DateFilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub column: &'static str,
    pub on_empty: DateEmptyPolicy,
    pub empty_warning: &'static str,
}

impl DateFilterSpec {
    /// Smallest and largest valid date of the column
    pub fn bounds(&self, frame: &Frame) -> Option<DateBounds> {
        let mut dates = frame.iter().filter_map(|row| row.date(self.column));
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateBounds {
            key: self.key.to_string(),
            label: self.label.to_string(),
            min,
            max,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CascadeOutcome {
    pub frame: Frame,
    pub panel: FilterPanel,
    pub date_bounds: Option<DateBounds>,
    pub warnings: Vec<String>,
}

/// Applies the date filter and the multi-select filters to `frame`
pub fn apply_cascade(
    frame: &Frame,
    specs: &[FilterSpec],
    date_spec: Option<&DateFilterSpec>,
    selection: &FilterSelection,
) -> CascadeOutcome {
    let mut warnings = Vec::new();
    let mut current = frame.clone();
    let mut date_bounds = None;

    if let Some(date_spec) = date_spec {
        date_bounds = date_spec.bounds(frame);
        if let Some(range) = selection.date_range {
            if !range.is_valid() {
                warnings.push(INVALID_DATE_RANGE.to_string());
            } else {
                let dated = current.filtered(|row| {
                    row.date(date_spec.column)
                        .is_some_and(|d: NaiveDate| range.contains(d))
                });
                if dated.is_empty() {
                    warnings.push(date_spec.empty_warning.to_string());
                    if date_spec.on_empty == DateEmptyPolicy::Apply {
                        current = dated;
                    }
                } else {
                    current = dated;
                }
            }
        }
    }

    let mut panel = FilterPanel::default();
    for spec in specs {
        let options = spec.build_options(frame, &current);
        if options.is_empty() {
            if let Some(warning) = spec.empty_warning {
                warnings.push(warning.to_string());
            }
        }

        let mut selected: Vec<String> = Vec::new();
        for wanted in selection.selected(spec.key) {
            let matched = options
                .iter()
                .find(|opt| &opt.value == wanted || &opt.label == wanted);
            if let Some(opt) = matched {
                if !selected.contains(&opt.value) {
                    selected.push(opt.value.clone());
                }
            }
        }

        if !selected.is_empty() {
            current.retain(|row| {
                row.text(spec.column)
                    .is_some_and(|value| selected.contains(&value))
            });
        }

        panel.filters.push(FilterState {
            key: spec.key.to_string(),
            label: spec.label.to_string(),
            options,
            selected,
        });
    }

    CascadeOutcome {
        frame: current,
        panel,
        date_bounds,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filters::DateRange;
    use serde_json::{Value, json};

    fn trainees() -> Frame {
        Frame::from_rows(
            vec![
                "school_name".into(),
                "apply_major_name".into(),
                "gender".into(),
                "province".into(),
                "created_at".into(),
            ],
            vec![
                vec![json!("ITC"), json!("Civil"), json!("male"), json!("Kandal"), json!("2024-01-10 09:00:00")],
                vec![json!("ITC"), json!("IT"), json!("female"), json!("Takeo"), json!("2024-02-10 09:00:00")],
                vec![json!("NPIC"), json!("Welding"), json!("female"), json!("Kandal"), json!("2024-03-10 09:00:00")],
                vec![json!("NPIC"), json!("IT"), json!("Unknown"), json!("Kep"), Value::Null],
            ],
        )
    }

    fn specs() -> Vec<FilterSpec> {
        vec![
            FilterSpec::full("school", "គ្រឹះស្ថាន អ.ប.វ.", "school_name"),
            FilterSpec::cascaded("major", "ជំនាញ", "apply_major_name"),
            FilterSpec::full("gender", "ភេទ", "gender")
                .with_labels(LabelSet::Gender { mapped_only: false }),
        ]
    }

    fn date_spec(on_empty: DateEmptyPolicy) -> DateFilterSpec {
        DateFilterSpec {
            key: "created",
            label: "ជ្រើសរើសចន្លោះកាលបរិច្ឆេទ",
            column: "created_at",
            on_empty,
            empty_warning: "empty range",
        }
    }

    fn select(pairs: &[(&str, &[&str])]) -> FilterSelection {
        let mut selection = FilterSelection::default();
        for (key, values) in pairs {
            selection
                .values
                .insert(key.to_string(), values.iter().map(|v| v.to_string()).collect());
        }
        selection
    }

    fn option_values(state: &FilterState) -> Vec<&str> {
        state.options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_no_selection_keeps_everything() {
        let outcome = apply_cascade(&trainees(), &specs(), None, &FilterSelection::default());
        assert_eq!(outcome.frame.len(), 4);
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.panel.filters.len(), 3);
        assert!(outcome.panel.filters.iter().all(|f| f.selected.is_empty()));
    }

    #[test]
    fn test_cascaded_options_follow_earlier_filters() {
        let outcome = apply_cascade(&trainees(), &specs(), None, &select(&[("school", &["ITC"])]));
        assert_eq!(outcome.frame.len(), 2);
        assert_eq!(option_values(&outcome.panel.filters[0]), vec!["ITC", "NPIC"]);
        assert_eq!(option_values(&outcome.panel.filters[1]), vec!["Civil", "IT"]);
        // full options ignore the school selection
        assert_eq!(
            option_values(&outcome.panel.filters[2]),
            vec!["Unknown", "female", "male"]
        );
    }

    #[test]
    fn test_khmer_label_selects_english_value() {
        let outcome = apply_cascade(&trainees(), &specs(), None, &select(&[("gender", &["ស្រី"])]));
        assert_eq!(outcome.frame.len(), 2);
        assert_eq!(outcome.panel.filters[2].selected, vec!["female".to_string()]);
        assert!(
            outcome
                .frame
                .iter()
                .all(|row| row.text("gender").as_deref() == Some("female"))
        );
    }

    #[test]
    fn test_unknown_selection_is_ignored() {
        let outcome = apply_cascade(&trainees(), &specs(), None, &select(&[("school", &["Nowhere"])]));
        assert_eq!(outcome.frame.len(), 4);
        assert!(outcome.panel.filters[0].selected.is_empty());
    }

    #[test]
    fn test_dictionary_options() {
        let specs = vec![FilterSpec::dictionary(
            "province",
            "ខេត្ត/ក្រុង",
            "province",
            &labels::PROVINCES,
        )];
        let outcome = apply_cascade(&trainees(), &specs, None, &select(&[("province", &["កណ្ដាល"])]));
        assert_eq!(outcome.panel.filters[0].options.len(), 25);
        assert_eq!(outcome.frame.len(), 2);
    }

    #[test]
    fn test_mapped_only_gender_warns_when_empty() {
        let frame = Frame::from_rows(
            vec!["gender".into()],
            vec![vec![json!("Unknown")], vec![Value::Null]],
        );
        let specs = vec![
            FilterSpec::cascaded("gender", "ភេទ", "gender")
                .with_labels(LabelSet::Gender { mapped_only: true })
                .warn_when_empty("⚠️ No gender data available."),
        ];
        let outcome = apply_cascade(&frame, &specs, None, &FilterSelection::default());
        assert!(outcome.panel.filters[0].options.is_empty());
        assert_eq!(outcome.warnings, vec!["⚠️ No gender data available.".to_string()]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let mut selection = FilterSelection::default();
        selection.date_range = Some(DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        });
        let spec = date_spec(DateEmptyPolicy::Apply);
        let outcome = apply_cascade(&trainees(), &specs(), Some(&spec), &selection);
        assert_eq!(outcome.frame.len(), 2);

        let bounds = outcome.date_bounds.unwrap();
        assert_eq!(bounds.min, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_reversed_date_range_warns_and_skips() {
        let mut selection = FilterSelection::default();
        selection.date_range = Some(DateRange {
            start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });
        let spec = date_spec(DateEmptyPolicy::Apply);
        let outcome = apply_cascade(&trainees(), &specs(), Some(&spec), &selection);
        assert_eq!(outcome.frame.len(), 4);
        assert_eq!(outcome.warnings, vec![INVALID_DATE_RANGE.to_string()]);
    }

    #[test]
    fn test_empty_date_range_policies() {
        let mut selection = FilterSelection::default();
        selection.date_range = Some(DateRange {
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        });

        let apply = date_spec(DateEmptyPolicy::Apply);
        let outcome = apply_cascade(&trainees(), &specs(), Some(&apply), &selection);
        assert!(outcome.frame.is_empty());
        assert_eq!(outcome.warnings, vec!["empty range".to_string()]);

        let ignore = date_spec(DateEmptyPolicy::Ignore);
        let outcome = apply_cascade(&trainees(), &specs(), Some(&ignore), &selection);
        assert_eq!(outcome.frame.len(), 4);
        assert_eq!(outcome.warnings, vec!["empty range".to_string()]);
    }
}
