use serde_json::json;

use super::super::context::{NO_DATA_WARNING, PageOutput, ReportContext, people_card, years_card};
use super::STUDENTS;
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate;
use crate::pipeline::charts::{self, BarOptions, Head};
use crate::pipeline::derive::{self, AGE_COLUMN};
use crate::pipeline::labels::{self, MARITAL_BY_CODE, PROVINCES};
use crate::pipeline::{FilterSpec, LabelSet, apply_cascade};
use crate::storage::TableQuery;

const UNKNOWN_FILLED: [&str; 4] = ["gender", "apply_major_name", "sector_name", "status"];

fn filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::dictionary("province", "ខេត្ត/ក្រុង", "address_city_provinces", &PROVINCES),
        FilterSpec::cascaded("school", "គ្រឹះស្ថាន អ.ប.វ.", "school_name"),
        FilterSpec::cascaded("sector", "វិស័យ", "sector_name"),
        FilterSpec::cascaded("major", "ជំនាញ", "apply_major_name"),
        FilterSpec::full("gender", "ភេទ", "gender")
            .with_labels(LabelSet::Gender { mapped_only: false }),
    ]
}

pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let mut frame = ctx
        .load(TableQuery::all(&ctx.tables().tvetsms_data))
        .await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_DATA_WARNING));
    }
    for column in UNKNOWN_FILLED {
        frame.fill_null(column, json!("Unknown"));
    }
    derive::add_calendar_age(&mut frame, ctx.today());

    let mut output = PageOutput::from_cascade(apply_cascade(&frame, &filters(), None, selection));
    if output.empty {
        return Ok(output);
    }
    output.kpis = kpis(&output.frame);
    output.charts = charts(&output.frame);
    Ok(output)
}

fn kpis(frame: &Frame) -> Vec<KpiCard> {
    let total = frame.len() as u64;
    let female = aggregate::count_where(frame, |row| {
        row.text("gender").is_some_and(|g| labels::is_female(&g))
    });
    let average_age = aggregate::mean_floor(frame.iter().filter_map(|row| row.int(AGE_COLUMN)));
    let active = aggregate::count_eq_int(frame, "status", 1);

    vec![
        people_card("total", "ចំនួនសិស្សសរុប", total),
        years_card("average_age", "អាយុសិស្សជាមធ្យម", average_age),
        people_card("female", "ចំនួនសិស្សស្រីសរុប", female),
        people_card("active", "សិស្សកំពុងសិក្សា", active),
    ]
}

fn charts(frame: &Frame) -> Vec<ChartPanel> {
    let by_province = aggregate::value_counts_by(frame, |row| {
        row.text("address_city_provinces")
            .map(|p| labels::province_label(&p))
    });

    vec![
        ChartPanel::new(
            "gender",
            "ការបែងចែកសិស្សតាមភេទ",
            charts::gender_pie(frame, "gender", charts::PIE),
        ),
        ChartPanel::new(
            "age",
            "ស្ថិតិសិស្សតាមអាយុ",
            charts::age_line(frame, AGE_COLUMN, "gender", STUDENTS),
        ),
        ChartPanel::new(
            "marital_status",
            "ស្ថានភាពអាពាហ៍ពិពាហ៍របស់សិស្ស",
            charts::status_donut(frame, "marital_status", &MARITAL_BY_CODE),
        ),
        ChartPanel::new(
            "sector",
            "ស្ថិតិសិស្សតាមវិស័យ",
            charts::column_bar(frame, "sector_name", &BarOptions::new("វិស័យ", STUDENTS)),
        ),
        ChartPanel::new(
            "province",
            "ស្ថិតិសិស្សតាមខេត្ត/ក្រុង",
            charts::counts_bar(by_province, &BarOptions::new("ខេត្ត/ក្រុង", STUDENTS)),
        ),
        ChartPanel::new(
            "school",
            "ស្ថិតិសិស្សតាមគ្រឹះស្ថាន អ.ប.វ.",
            charts::column_bar(
                frame,
                "school_name",
                &BarOptions::new("គ្រឹះស្ថាន អ.ប.វ.", STUDENTS).head(Head::Smallest(30)),
            ),
        ),
    ]
}
