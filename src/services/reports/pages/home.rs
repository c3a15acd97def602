use std::collections::BTreeMap;

use serde_json::json;

use super::super::context::{NO_DATA_WARNING, PageOutput, ReportContext};
use super::STUDENTS;
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate::{self, format_thousands};
use crate::pipeline::charts::{self, BarOptions};
use crate::pipeline::labels;
use crate::storage::TableQuery;

const FIXED_AVERAGE_AGE: i64 = 20;

/// Students per province over both programmes, summed
pub async fn build(ctx: &ReportContext) -> Result<PageOutput> {
    let tables = ctx.tables();
    let tvet15m = ctx
        .load(TableQuery::column(&tables.tvet15m_data, "province_name"))
        .await?;
    let tvetsms = ctx
        .load(TableQuery::column(&tables.tvetsms_data, "address_city_provinces"))
        .await?;

    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for (province, n) in aggregate::value_counts(&tvet15m, "province_name")
        .into_iter()
        .chain(aggregate::value_counts(&tvetsms, "address_city_provinces"))
    {
        *totals.entry(province).or_default() += n;
    }

    let frame = Frame::from_rows(
        vec!["province_khmer".to_string(), "count".to_string()],
        totals
            .iter()
            .map(|(province, n)| vec![json!(labels::province_label(province)), json!(n)])
            .collect(),
    );
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_DATA_WARNING));
    }

    let total: u64 = totals.values().sum();
    let kpis = vec![
        plain_card("total", "ចំនួនសិស្សសរុប", total),
        plain_card("female", "ចំនួនសិស្សស្រីសរុប", total / 2),
        KpiCard::new(
            "average_age",
            "អាយុសិស្សជាមធ្យម",
            Some(FIXED_AVERAGE_AGE as f64),
            FIXED_AVERAGE_AGE.to_string(),
        ),
        plain_card("studying", "សិស្សកំពុងសិក្សា", total),
    ];

    let by_province: Vec<(String, u64)> = totals
        .iter()
        .map(|(province, n)| (labels::province_label(province), *n))
        .collect();
    let charts = vec![ChartPanel::new(
        "students_by_province",
        "ស្ថិតិសិស្សតាមខេត្ត",
        charts::counts_bar(by_province, &BarOptions::new("ខេត្ត", STUDENTS)),
    )];

    Ok(PageOutput {
        frame,
        kpis,
        charts,
        ..PageOutput::default()
    })
}

fn plain_card(key: &str, label: &str, n: u64) -> KpiCard {
    KpiCard::new(key, label, Some(n as f64), format_thousands(n as i64))
}
