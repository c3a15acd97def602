use super::super::context::{PageOutput, ReportContext, percent_card};
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate::{self, format_percentage, format_whole_percentage};
use crate::pipeline::charts::{self, BarOptions, Head};
use crate::pipeline::labels::STATUS_NAMES;
use crate::pipeline::{FilterSpec, apply_cascade};
use crate::storage::TableQuery;

const NO_PARTNERS: &str = "No development partners data found.";
const TYPE_COLUMN: &str = "type_development_partners";
const PARTNER_COUNT: &str = "ចំនួនដៃគូរ";

fn filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::full("province", "ខេត្ត/ក្រុង", "city_province_name"),
        FilterSpec::cascaded("school", "ឈ្មោះគ្រឹះស្ថាន", "school_name"),
        FilterSpec::cascaded("type", "ប្រភេទដៃគូរសហការ", TYPE_COLUMN),
        FilterSpec::cascaded("business", "ប្រភេទអាជីវកម្ម", "business"),
    ]
}

pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let frame = ctx.load(TableQuery::all(&ctx.tables().partners)).await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_PARTNERS));
    }

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
    let private = aggregate::count_eq_text(frame, TYPE_COLUMN, "ជាមួយវិស័យឯកជន");
    let domestic = aggregate::count_eq_text(frame, TYPE_COLUMN, "ក្នុងប្រទេស");
    let foreign = aggregate::count_eq_text(frame, TYPE_COLUMN, "ក្រៅប្រទេស");
    let active = aggregate::count_eq_int(frame, "status", 1);

    vec![
        KpiCard::new("total", "ចំនួនដៃគូរសហការសរុប", Some(total as f64), total.to_string()),
        percent_card(
            "private_sector",
            "ភាគរយដៃគូរជាមួយវិស័យឯកជន",
            private,
            total,
            format_whole_percentage,
        ),
        percent_card("domestic", "ភាគរយដៃគូរនៅក្នុងប្រទេស", domestic, total, format_percentage),
        percent_card("foreign", "ភាគរយដៃគូរនៅក្រៅប្រទេស", foreign, total, format_percentage),
        percent_card("active", "ភាគរយដៃគូរសកម្ម", active, total, format_whole_percentage),
    ]
}

fn charts(frame: &Frame) -> Vec<ChartPanel> {
    let types = if frame.all_null(TYPE_COLUMN) {
        charts::placeholder()
    } else {
        charts::counts_pie(aggregate::value_counts(frame, TYPE_COLUMN), charts::DONUT)
    };

    vec![
        ChartPanel::new("type", "ប្រភេទរបស់ដៃគូរសហការ", types),
        ChartPanel::new(
            "province",
            "ដៃគូរសហការតាមខេត្ត/ក្រុង (១៥)",
            charts::column_bar(
                frame,
                "city_province_name",
                &BarOptions::new("ខេត្ត/ក្រុង", "ចំនួន").head(Head::Largest(15)),
            ),
        ),
        ChartPanel::new(
            "status",
            "ស្ថានភាពរបស់ដៃគូរសហការ",
            charts::status_donut(frame, "status", &STATUS_NAMES),
        ),
        ChartPanel::new(
            "school",
            "ស្ថិតិដៃគូរសហការតាមគ្រឹះស្ថាន អ.ប.វ. (១៥)",
            charts::column_bar(
                frame,
                "school_name",
                &BarOptions::new("គ្រឹះស្ថាន អ.ប.វ.", PARTNER_COUNT).head(Head::Largest(15)),
            ),
        ),
        ChartPanel::new(
            "business",
            "ស្ថិតិដៃគូរសហការតាមប្រភេទអាជីវកម្ម (២៥)",
            charts::column_bar(
                frame,
                "business",
                &BarOptions::new("ប្រភេទអាជីវកម្ម", PARTNER_COUNT).head(Head::Largest(25)),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::charts::ChartSpec;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn partners() -> Frame {
        Frame::from_rows(
            vec![
                "city_province_name".into(),
                "school_name".into(),
                "type_development_partners".into(),
                "business".into(),
                "status".into(),
            ],
            vec![
                vec![json!("Phnom Penh"), json!("ITC"), json!("ជាមួយវិស័យឯកជន"), json!("Retail"), json!(1)],
                vec![json!("Phnom Penh"), json!("ITC"), json!("ក្នុងប្រទេស"), json!("Retail"), json!(1)],
                vec![json!("Siem Reap"), json!("NPIC"), json!("ក្រៅប្រទេស"), json!("Hotel"), json!(0)],
            ],
        )
    }

    #[test]
    fn test_kpis() {
        let cards = kpis(&partners());
        assert_eq!(cards[0].display, "3");
        assert_eq!(cards[1].display, "33%");
        assert_eq!(cards[2].display, "33.33%");
        assert_eq!(cards[3].display, "33.33%");
        assert_eq!(cards[4].display, "67%");
    }

    #[test]
    fn test_business_bar_ascending_by_count() {
        let panels = charts(&partners());
        match &panels[4].chart {
            ChartSpec::Bar { categories, .. } => {
                assert_eq!(categories, &vec!["Hotel".to_string(), "Retail".to_string()]);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
    }

    #[test]
    fn test_type_filter_cascades_from_province() {
        let mut values = BTreeMap::new();
        values.insert("province".to_string(), vec!["Siem Reap".to_string()]);
        let selection = FilterSelection {
            values,
            date_range: None,
        };
        let outcome = apply_cascade(&partners(), &filters(), None, &selection);
        assert_eq!(outcome.frame.len(), 1);
        let types = &outcome.panel.filters[2];
        assert_eq!(types.options.len(), 1);
        assert_eq!(types.options[0].value, "ក្រៅប្រទេស");
    }
}
