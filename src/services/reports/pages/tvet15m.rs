use serde_json::json;

use super::super::context::{NO_DATA_WARNING, PageOutput, ReportContext, people_card, years_card};
use super::{DATE_RANGE_LABEL, TRAINEES};
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate;
use crate::pipeline::charts::{self, BarOptions, Head};
use crate::pipeline::derive::{self, AGE_COLUMN};
use crate::pipeline::labels::{self, SCHOLARSHIP_STATUS};
use crate::pipeline::{DateEmptyPolicy, DateFilterSpec, FilterSpec, LabelSet, apply_cascade};
use crate::storage::TableQuery;

/// Scholarship status of trainees who completed their course
pub(super) const GRADUATED_STATUS: i64 = 8;

pub(super) fn date_filter() -> DateFilterSpec {
    DateFilterSpec {
        key: "registered",
        label: DATE_RANGE_LABEL,
        column: "rtimeline_created_at",
        on_empty: DateEmptyPolicy::Apply,
        empty_warning: "⚠️ គ្មានទិន្នន័យក្នុងចន្លោះកាលបរិច្ឆេទដែលបានជ្រើស។ សូមជ្រើសរើសកាលបរិច្ឆេទផ្សេងទៀត។",
    }
}

pub(super) fn filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::full("school", "គ្រឹះស្ថាន អ.ប.វ.", "school_name"),
        FilterSpec::cascaded("major", "ជំនាញ", "apply_major_name"),
        FilterSpec::full("gender", "ភេទ", "gender")
            .with_labels(LabelSet::Gender { mapped_only: false }),
        FilterSpec::full("province", "ខេត្ត/ក្រុង", "address_city_province_name"),
        FilterSpec::full("job", "ស្ថានភាពការងារ", "has_job"),
    ]
}

pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let mut frame = ctx.load(TableQuery::all(&ctx.tables().tvet15m)).await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_DATA_WARNING));
    }
    frame.fill_null("gender", json!("Unknown"));
    frame.fill_null("apply_major_name", json!("Unknown"));
    derive::add_calendar_age(&mut frame, ctx.today());

    let outcome = apply_cascade(&frame, &filters(), Some(&date_filter()), selection);
    let mut output = PageOutput::from_cascade(outcome);
    if output.empty {
        return Ok(output);
    }
    output.kpis = kpis(&output.frame);

    let mut panels = trainee_charts(&output.frame);
    panels.push(ChartPanel::new(
        "scholarship_status",
        "ស្ថានភាពរបស់សិក្ខាកាម",
        charts::status_donut(&output.frame, "scholarship_status", &SCHOLARSHIP_STATUS),
    ));
    panels.push(position_chart(&output.frame, 15, "មុខតំណែងរបស់សិក្ខាកាមក្នុងបរិបទការងារ (១៥)"));
    output.charts = panels;
    Ok(output)
}

pub(super) fn female_count(frame: &Frame) -> u64 {
    aggregate::count_where(frame, |row| {
        row.text("gender").is_some_and(|g| labels::is_female(&g))
    })
}

pub(super) fn average_age(frame: &Frame) -> i64 {
    aggregate::mean_floor(frame.iter().filter_map(|row| row.int(AGE_COLUMN)))
}

fn kpis(frame: &Frame) -> Vec<KpiCard> {
    let graduated = aggregate::count_eq_int(frame, "scholarship_status", GRADUATED_STATUS);

    vec![
        people_card("total", "ចំនួនសិស្សសរុប", frame.len() as u64),
        years_card("average_age", "អាយុសិស្សជាមធ្យម", average_age(frame)),
        people_card("female", "ចំនួនសិស្សស្រីសរុប", female_count(frame)),
        people_card("graduated", "សិស្សបានបញ្ចប់ការសិក្សា", graduated),
    ]
}

/// Charts shared with the graduated trainees page
pub(super) fn trainee_charts(frame: &Frame) -> Vec<ChartPanel> {
    vec![
        ChartPanel::new(
            "gender",
            "ការបែងចែកសិក្ខាកាមតាមភេទ",
            charts::gender_pie(frame, "gender", charts::PIE),
        ),
        ChartPanel::new(
            "age",
            "ស្ថិតិសិក្ខាកាមតាមអាយុ",
            charts::age_line(frame, AGE_COLUMN, "gender", TRAINEES),
        ),
        ChartPanel::new(
            "province",
            "ការបែងចែកចំនួនសិស្សតាមខេត្ត",
            charts::column_bar(
                frame,
                "address_city_province_name",
                &BarOptions::new("ខេត្ត/ក្រុង", TRAINEES),
            ),
        ),
        ChartPanel::new(
            "attendance",
            "ស្ថិតិសិក្ខាកាមតាមអត្រាអវត្តមាន",
            charts::counts_scatter(frame, "average_attendance", "អត្រាអវត្តមាន (%)", TRAINEES),
        ),
        ChartPanel::new(
            "shift",
            "ស្ថិតិសិក្ខាកាមតាមវេនសិក្សា",
            charts::grouped_bar(
                aggregate::group_counts(frame, "shift_name", "gender"),
                "វេនសិក្សា",
                TRAINEES,
                labels::gender_label,
            ),
        ),
        ChartPanel::new(
            "has_job",
            "ស្ថិតិសិក្ខាកាមតាមការមានការងារធ្វើ",
            charts::grouped_bar(
                aggregate::group_counts(frame, "has_job", "gender"),
                "ការមានការងារ",
                TRAINEES,
                labels::gender_label,
            ),
        ),
        ChartPanel::new(
            "income",
            "ស្ថិតិប្រាក់ចំណូលរបស់សិក្ខាកាម",
            charts::income_line(frame, "income", TRAINEES),
        ),
    ]
}

pub(super) fn position_chart(frame: &Frame, top: usize, title: &str) -> ChartPanel {
    ChartPanel::new(
        "position",
        title,
        charts::column_bar(
            frame,
            "position",
            &BarOptions::new("មុខតំណែង", TRAINEES).head(Head::Largest(top)),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::charts::ChartSpec;
    use crate::models::filters::DateRange;
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn trainees() -> Frame {
        let mut frame = Frame::from_rows(
            vec![
                "school_name".into(),
                "apply_major_name".into(),
                "gender".into(),
                "address_city_province_name".into(),
                "has_job".into(),
                "shift_name".into(),
                "scholarship_status".into(),
                "rtimeline_created_at".into(),
                "date_of_birth".into(),
                "income".into(),
            ],
            vec![
                vec![json!("ITC"), json!("IT"), json!("female"), json!("Kandal"), json!(1), json!("Morning"), json!(8), json!("2024-01-15 08:00:00"), json!("2000-05-01"), json!(120)],
                vec![json!("ITC"), json!("IT"), json!("male"), json!("Kandal"), json!(0), json!("Morning"), json!(1), json!("2024-03-15 08:00:00"), json!("2002-05-01"), json!(60)],
                vec![json!("NPIC"), Value::Null, Value::Null, json!("Takeo"), json!(1), json!("Evening"), json!(8), json!("2024-06-15 08:00:00"), json!("bad"), Value::Null],
            ],
        );
        frame.fill_null("gender", json!("Unknown"));
        frame.fill_null("apply_major_name", json!("Unknown"));
        derive::add_calendar_age(&mut frame, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        frame
    }

    #[test]
    fn test_kpis() {
        let cards = kpis(&trainees());
        assert_eq!(cards[0].display, "3 នាក់");
        // 25, 23 and 0 for the unparseable birth date
        assert_eq!(cards[1].display, "16 ឆ្នាំ");
        assert_eq!(cards[2].display, "1 នាក់");
        assert_eq!(cards[3].display, "2 នាក់");
    }

    #[test]
    fn test_empty_date_range_is_applied() {
        let selection = FilterSelection {
            values: BTreeMap::new(),
            date_range: Some(DateRange {
                start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            }),
        };
        let outcome = apply_cascade(&trainees(), &filters(), Some(&date_filter()), &selection);
        assert!(outcome.frame.is_empty());
        assert_eq!(outcome.warnings, vec![date_filter().empty_warning.to_string()]);
    }

    #[test]
    fn test_job_filter_matches_numeric_codes() {
        let mut values = BTreeMap::new();
        values.insert("job".to_string(), vec!["1".to_string()]);
        let selection = FilterSelection {
            values,
            date_range: None,
        };
        let outcome = apply_cascade(&trainees(), &filters(), Some(&date_filter()), &selection);
        assert_eq!(outcome.frame.len(), 2);
    }

    #[test]
    fn test_shift_chart_groups_by_gender() {
        let panels = trainee_charts(&trainees());
        match &panels[4].chart {
            ChartSpec::Bar { categories, series, .. } => {
                assert_eq!(categories, &vec!["Evening".to_string(), "Morning".to_string()]);
                let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["Unknown", "ស្រី", "ប្រុស"]);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
        assert!(panels[3].chart.is_placeholder());
    }
}
