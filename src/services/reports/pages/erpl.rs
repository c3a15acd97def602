use serde_json::json;

use super::super::context::{NO_DATA_WARNING, PageOutput, ReportContext, people_card, years_card};
use super::TRAINEES;
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate;
use crate::pipeline::charts::{self, BarOptions};
use crate::pipeline::derive::{self, AGE_COLUMN};
use crate::pipeline::labels::{self, MARITAL_BY_NAME, VERIFIED};
use crate::storage::TableQuery;

/// Recognition of prior learning candidates, shown without filters
pub async fn build(ctx: &ReportContext) -> Result<PageOutput> {
    let mut frame = ctx.load(TableQuery::all(&ctx.tables().erpl_candidates)).await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_DATA_WARNING));
    }
    frame.fill_null("gender", json!("Unknown"));
    derive::add_calendar_age(&mut frame, ctx.today());

    Ok(PageOutput {
        kpis: kpis(&frame),
        charts: charts(&frame),
        frame,
        ..PageOutput::default()
    })
}

fn kpis(frame: &Frame) -> Vec<KpiCard> {
    let female = aggregate::count_where(frame, |row| {
        row.text("gender").is_some_and(|g| labels::is_female(&g))
    });
    let average_age = aggregate::mean_floor(frame.iter().filter_map(|row| row.int(AGE_COLUMN)));

    vec![
        people_card("total", "ចំនួនសិស្សសរុប", frame.len() as u64),
        years_card("average_age", "អាយុសិស្សជាមធ្យម", average_age),
        people_card("female", "ចំនួនសិស្សស្រីសរុប", female),
        // not tracked for candidates yet
        KpiCard::new("graduated", "សិស្សបានបញ្ចប់ការសិក្សា", None, " នាក់"),
    ]
}

fn charts(frame: &Frame) -> Vec<ChartPanel> {
    let marital = if frame.all_null("marital_status") {
        charts::placeholder()
    } else {
        let counts = aggregate::value_counts_by(frame, |row| {
            let status = row.text("marital_status")?;
            labels::lookup(&MARITAL_BY_NAME, status.as_str()).map(str::to_string)
        });
        charts::counts_pie(counts, charts::DONUT)
    };

    let verified = aggregate::group_counts_by(frame, |row| {
        Some((row.int("verified")?, row.text("gender")?))
    })
    .into_iter()
    .map(|(code, gender, n)| {
        let label = labels::lookup(&VERIFIED, code).map_or_else(|| code.to_string(), str::to_string);
        (label, gender, n)
    })
    .collect();

    vec![
        ChartPanel::new("marital_status", "ស្ថានភាពអាពាហ៍ពិពាហ៍របស់សិស្ស", marital),
        ChartPanel::new(
            "gender",
            "ការបែងចែកសិស្សតាមភេទ",
            charts::gender_pie(frame, "gender", charts::DONUT),
        ),
        ChartPanel::new(
            "verified",
            "ស្ថិតិសិក្ខាកាមតាមវេនសិក្សា",
            charts::grouped_bar(
                verified,
                "ស្ថានភាពនៃការធ្វើតេស្ត",
                "ចំនួនអ្នកធ្វើតេស្ត",
                labels::gender_label,
            ),
        ),
        ChartPanel::new(
            "province",
            "ការបែងចែកចំនួនសិស្សតាមខេត្ត",
            charts::column_bar(
                frame,
                "address_city_provinces",
                &BarOptions::new("ខេត្ត/ក្រុង", TRAINEES),
            ),
        ),
    ]
}
