use chrono::NaiveDate;

use super::super::context::{PageOutput, ReportContext, people_card, years_card};
use super::DATE_RANGE_LABEL;
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate;
use crate::pipeline::charts::{self, BarOptions, Head};
use crate::pipeline::derive::{self, AGE_COLUMN};
use crate::pipeline::labels::{self, STATUS_NAMES};
use crate::pipeline::{DateEmptyPolicy, DateFilterSpec, FilterSpec, apply_cascade};
use crate::storage::TableQuery;

const NO_TEACHERS: &str = "No teacher data found.";
const START_WORK_AT: &str = "start_work_at";
const TEACHER_COUNT: &str = "ចំនួនគ្រូ";

fn date_filter() -> DateFilterSpec {
    DateFilterSpec {
        key: "start_work",
        label: DATE_RANGE_LABEL,
        column: START_WORK_AT,
        on_empty: DateEmptyPolicy::Ignore,
        empty_warning: "⚠️ គ្មានគ្រូក្នុងចន្លោះកាលបរិច្ឆេទដែលបានជ្រើស។ សូមជ្រើសរើសកាលបរិច្ឆេទផ្សេងទៀត។",
    }
}

fn filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::cascaded("province", "ខេត្ត/ក្រុង", "address_city_provinces"),
        FilterSpec::cascaded("role", "តួនាទី", "role_name"),
    ]
}

/// Lecturers are the school staff flagged as teaching
pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let mut frame = ctx
        .load(TableQuery::all(&ctx.tables().school_staff).where_eq("is_teaching", 1))
        .await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_TEACHERS));
    }
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
    derive::normalize_dates(&mut frame, START_WORK_AT, epoch);

    let date_applies = date_selection_holds(&frame, selection);
    let outcome = apply_cascade(&frame, &filters(), Some(&date_filter()), selection);
    let mut output = PageOutput::from_cascade(outcome);
    if output.empty {
        return Ok(output);
    }
    derive::add_elapsed_age(&mut output.frame, ctx.today());
    // cards stay hidden while the date range is reversed or matches nobody
    if date_applies {
        output.kpis = kpis(&output.frame);
    }
    output.charts = charts(&output.frame);
    Ok(output)
}

fn date_selection_holds(frame: &Frame, selection: &FilterSelection) -> bool {
    match selection.date_range {
        None => true,
        Some(range) => {
            range.is_valid()
                && frame
                    .iter()
                    .any(|row| row.date(START_WORK_AT).is_some_and(|d| range.contains(d)))
        }
    }
}

fn kpis(frame: &Frame) -> Vec<KpiCard> {
    let total = frame.len() as u64;
    let average_age = aggregate::mean_floor(frame.iter().filter_map(|row| row.int(AGE_COLUMN)));
    let female = aggregate::count_where(frame, |row| {
        row.text("gender").is_some_and(|g| labels::is_female(&g))
    });
    let active = aggregate::count_eq_int(frame, "status", 1);

    vec![
        people_card("total", "ចំនួនសាស្ត្រាចារ្យសរុប", total),
        years_card("average_age", "អាយុជាមធ្យមនៃសាស្ត្រាចារ្យ", average_age),
        people_card("female", "ចំនួនសរុបនៃសាស្ត្រាចារ្យស្រី", female),
        people_card("active", "សាស្ត្រាចារ្យកំពុងបម្រើការងារ", active),
    ]
}

fn charts(frame: &Frame) -> Vec<ChartPanel> {
    let roles = aggregate::value_counts(frame, "role_name");
    let role_chart = if roles.is_empty() {
        charts::placeholder()
    } else {
        charts::counts_pie(roles, charts::DONUT)
    };

    vec![
        ChartPanel::new("role", "មុខតំណែងនៃសាស្ត្រាចារ្យ", role_chart),
        ChartPanel::new(
            "province",
            "ចំនួនសាស្ត្រាចារ្យតាមខេត្ត/ក្រុង",
            charts::column_bar(
                frame,
                "address_city_provinces",
                &BarOptions::new("ខេត្ត/ក្រុង", "ចំនួន").head(Head::Largest(26)),
            ),
        ),
        ChartPanel::new(
            "school",
            "ចំនួនសាស្ត្រាចារ្យតាមគ្រឹះស្ថាន អ.ប.វ.",
            charts::column_bar(
                frame,
                "schools_name",
                &BarOptions::new("គ្រឹះស្ថាន អ.ប.វ.", TEACHER_COUNT).head(Head::Smallest(25)),
            ),
        ),
        ChartPanel::new(
            "status",
            "ស្ថានភាពសាស្ត្រាចារ្យ",
            charts::status_donut(frame, "status", &STATUS_NAMES),
        ),
        ChartPanel::new(
            "employment_type",
            "ប្រភេទនៃការងាររបស់សាស្ត្រាចារ្យ",
            charts::column_bar(
                frame,
                "employment_type_name",
                &BarOptions::new("ប្រភេទការងារ", TEACHER_COUNT).horizontal(),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::charts::ChartSpec;
    use crate::models::filters::DateRange;
    use serde_json::{Value, json};

    fn teachers() -> Frame {
        let mut frame = Frame::from_rows(
            vec![
                "gender".into(),
                "role_name".into(),
                "status".into(),
                "start_work_at".into(),
                "address_city_provinces".into(),
                "employment_type_name".into(),
            ],
            vec![
                vec![json!("female"), json!("Lecturer"), json!(1), json!("2015-03-01 00:00:00"), json!("Kandal"), Value::Null],
                vec![json!("male"), json!("Dean"), json!(8), json!("0000-00-00 00:00:00"), json!("Takeo"), Value::Null],
                vec![json!("male"), json!("Lecturer"), json!(1), Value::Null, json!("Kandal"), Value::Null],
            ],
        );
        derive::normalize_dates(
            &mut frame,
            START_WORK_AT,
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        );
        frame
    }

    #[test]
    fn test_zero_dates_fall_back_to_epoch() {
        let frame = teachers();
        let bounds = date_filter().bounds(&frame).unwrap();
        assert_eq!(bounds.min, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert_eq!(bounds.max, NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
    }

    #[test]
    fn test_empty_date_range_keeps_previous_rows() {
        let selection = FilterSelection {
            date_range: Some(DateRange {
                start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            }),
            ..FilterSelection::default()
        };
        let outcome = apply_cascade(&teachers(), &filters(), Some(&date_filter()), &selection);
        assert_eq!(outcome.frame.len(), 3);
        assert_eq!(outcome.warnings.len(), 1);
    }

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> FilterSelection {
        FilterSelection {
            date_range: Some(DateRange {
                start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
                end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            }),
            ..FilterSelection::default()
        }
    }

    #[test]
    fn test_province_options_follow_date_range() {
        let selection = range((2014, 1, 1), (2016, 1, 1));
        let outcome = apply_cascade(&teachers(), &filters(), Some(&date_filter()), &selection);
        assert_eq!(outcome.frame.len(), 1);
        let provinces: Vec<&str> = outcome.panel.filters[0]
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(provinces, vec!["Kandal"]);

        let all = apply_cascade(&teachers(), &filters(), Some(&date_filter()), &FilterSelection::default());
        assert_eq!(all.panel.filters[0].options.len(), 2);
    }

    #[test]
    fn test_date_selection_gates_cards() {
        let frame = teachers();
        assert!(date_selection_holds(&frame, &FilterSelection::default()));
        assert!(date_selection_holds(&frame, &range((2014, 1, 1), (2016, 1, 1))));
        // matches nobody
        assert!(!date_selection_holds(&frame, &range((2000, 1, 1), (2001, 1, 1))));
        // reversed
        assert!(!date_selection_holds(&frame, &range((2016, 1, 1), (2014, 1, 1))));
    }

    #[test]
    fn test_charts() {
        let panels = charts(&teachers());
        match &panels[3].chart {
            ChartSpec::Pie { slices, .. } => {
                let names: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
                assert_eq!(names, vec!["ACTIVE", "FINISHED_STUDY"]);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
        assert!(panels[4].chart.is_placeholder());
    }
}
