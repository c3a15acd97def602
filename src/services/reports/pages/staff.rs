use super::super::context::{PageOutput, ReportContext, percent_card};
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate::{self, format_percentage};
use crate::pipeline::charts::{self, BarOptions, Head};
use crate::pipeline::derive::{self, AGE_COLUMN};
use crate::pipeline::{FilterSpec, LabelSet, apply_cascade};
use crate::storage::TableQuery;

const NO_STAFF: &str = "No staff data found.";
const NO_GENDER: &str = "⚠️ No gender data available.";
const STAFF_COUNT: &str = "ចំនួនបុគ្គលិក";

fn filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::full("province", "ខេត្ត/ក្រុង", "address_city_provinces"),
        FilterSpec::cascaded("role", "តួនាទី", "role_name"),
        FilterSpec::cascaded("gender", "ភេទ", "gender")
            .with_labels(LabelSet::Gender { mapped_only: true })
            .warn_when_empty(NO_GENDER),
    ]
}

pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let frame = ctx.load(TableQuery::all(&ctx.tables().staff)).await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_STAFF));
    }

    let mut output = PageOutput::from_cascade(apply_cascade(&frame, &filters(), None, selection));
    if output.empty {
        return Ok(output);
    }
    derive::add_elapsed_age(&mut output.frame, ctx.today());
    output.kpis = kpis(&output.frame);
    output.charts = charts(&output.frame);
    Ok(output)
}

/// Expects `age` in elapsed years, null where the birth date is invalid
fn kpis(frame: &Frame) -> Vec<KpiCard> {
    let total = frame.len() as u64;
    let female = aggregate::count_eq_text(frame, "gender", "female");
    let ages: Vec<i64> = frame.iter().filter_map(|row| row.int(AGE_COLUMN)).collect();
    let average_age = if ages.is_empty() {
        KpiCard::new("average_age", "អាយុជាមធ្យម", None, "N/A")
    } else {
        let mean = ages.iter().sum::<i64>() as f64 / ages.len() as f64;
        KpiCard::new("average_age", "អាយុជាមធ្យម", Some(mean), format!("{mean:.0} ឆ្នាំ"))
    };
    let active = aggregate::count_eq_int(frame, "status", 1);
    let top_role = aggregate::mode(frame, "role_name").unwrap_or_else(|| "N/A".to_string());

    vec![
        KpiCard::new("total", "ចំនួនបុគ្គលិកសរុប", Some(total as f64), format!("{total} នាក់")),
        KpiCard::new("female", "ចំនួនស្រ្តីសរុប", Some(female as f64), format!("{female} នាក់")),
        average_age,
        percent_card(
            "active",
            "ភាគរយនៃស្ថានភាពរបស់បុគ្គលិកកំពុងបម្រើការងារ",
            active,
            total,
            format_percentage,
        ),
        KpiCard::new("top_role", "តួនាទីកំពូល", None, top_role),
    ]
}

fn charts(frame: &Frame) -> Vec<ChartPanel> {
    let gender = if frame.all_null("gender") {
        charts::placeholder()
    } else {
        charts::gender_pie(frame, "gender", charts::DONUT)
    };

    vec![
        ChartPanel::new(
            "role",
            "តួនាទីរបស់បុគ្គលិក",
            charts::column_bar(
                frame,
                "role_name",
                &BarOptions::new("តួនាទី", STAFF_COUNT).horizontal(),
            ),
        ),
        ChartPanel::new(
            "province",
            "ចំនួនបុគ្គលិកតាមខេត្ត/ក្រុង (១៥)",
            charts::column_bar(
                frame,
                "address_city_provinces",
                &BarOptions::new("ខេត្ត/ក្រុង", STAFF_COUNT).head(Head::Largest(15)),
            ),
        ),
        ChartPanel::new(
            "age",
            "ស្ថិតិបុគ្គលិកតាមអាយុ",
            charts::age_line(frame, AGE_COLUMN, "gender", STAFF_COUNT),
        ),
        ChartPanel::new("gender", "ការបែងចែកបុគ្គលិកតាមភេទ", gender),
    ]
}
