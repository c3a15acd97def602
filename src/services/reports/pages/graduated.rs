use super::super::context::{NO_DATA_WARNING, PageOutput, ReportContext, people_card, years_card};
use super::tvet15m::{
    GRADUATED_STATUS, average_age, date_filter, female_count, filters, position_chart,
    trainee_charts,
};
use crate::errors::Result;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::{aggregate, apply_cascade, derive};
use crate::storage::TableQuery;

/// Trainees who completed their course; nulls are kept as loaded
pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let query = TableQuery::all(&ctx.tables().tvet15m).where_eq("scholarship_status", GRADUATED_STATUS);
    let mut frame = ctx.load(query).await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_DATA_WARNING));
    }
    derive::add_calendar_age(&mut frame, ctx.today());

    let outcome = apply_cascade(&frame, &filters(), Some(&date_filter()), selection);
    let mut output = PageOutput::from_cascade(outcome);
    if output.empty {
        return Ok(output);
    }
    output.kpis = kpis(&output.frame);

    let mut panels = trainee_charts(&output.frame);
    panels.push(position_chart(&output.frame, 25, "មុខតំណែងរបស់សិក្ខាកាមក្នុងបរិបទការងារ (២៥)"));
    output.charts = panels;
    Ok(output)
}

fn kpis(frame: &Frame) -> Vec<KpiCard> {
    let employed = aggregate::count_eq_int(frame, "has_job", 1);

    vec![
        people_card("total", "ចំនួនសិក្ខាកាមសរុប", frame.len() as u64),
        years_card("average_age", "អាយុសិក្ខាកាមជាមធ្យម", average_age(frame)),
        people_card("female", "ចំនួនសិក្ខាកាមស្រីសរុប", female_count(frame)),
        people_card("employed", "ចំនួនសិក្ខាកាមមានការងារធ្វើ", employed),
    ]
}
