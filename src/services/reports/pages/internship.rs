use super::super::context::{PageOutput, ReportContext, people_card};
use super::TRAINEES;
use crate::errors::Result;
use crate::models::charts::ChartPanel;
use crate::models::filters::FilterSelection;
use crate::models::frames::Frame;
use crate::models::reports::KpiCard;
use crate::pipeline::aggregate;
use crate::pipeline::charts::{self, BarOptions, Head};
use crate::pipeline::labels::{self, POVERTY_STATUS};
use crate::pipeline::{FilterSpec, LabelSet, apply_cascade};
use crate::storage::TableQuery;

const NO_INTERNSHIPS: &str = "រកមិនឃើញទិន្នន័យ";
const NO_GENDER: &str = "⚠️ No gender data available after previous filters.";
const GENDER_DOMAIN: [&str; 2] = ["female", "male"];

fn filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec::full("province", "ខេត្ត/ក្រុង", "province_name"),
        FilterSpec::cascaded("school", "គ្រឹះស្ថាន អ.ប.វ.", "school_name"),
        FilterSpec::cascaded("gender", "ភេទ", "gender")
            .with_labels(LabelSet::Gender { mapped_only: true })
            .warn_when_empty(NO_GENDER),
    ]
}

pub async fn build(ctx: &ReportContext, selection: &FilterSelection) -> Result<PageOutput> {
    let frame = ctx.load(TableQuery::all(&ctx.tables().internships)).await?;
    if frame.is_empty() {
        return Ok(PageOutput::no_source_rows(frame, NO_INTERNSHIPS));
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
    let passed = aggregate::count_eq_int(frame, "internship_pass_fail", 1);
    let female = aggregate::count_where(frame, |row| {
        row.text("gender").is_some_and(|g| labels::is_female(&g))
    });

    vec![
        people_card("total", "ចំនួនសិក្ខាកាមសរុប", frame.len() as u64),
        people_card("passed", "សិក្ខាកាមបានជាប់កម្មសិក្សា", passed),
        people_card("female", "ចំនួនសិក្ខាកាមស្រីសរុប", female),
        // completion is recorded by the pass flag
        people_card("graduated", "សិស្សបានបញ្ចប់ការសិក្សា", passed),
    ]
}

/// Every equity card status by gender, missing statuses counted under the empty code
fn poverty_chart(frame: &Frame) -> ChartPanel {
    let statuses: Vec<&str> = POVERTY_STATUS.iter().map(|(code, _)| *code).collect();
    let groups = aggregate::group_counts_complete(frame, &statuses, &GENDER_DOMAIN, |row| {
        let status = row.text("poverty_status").unwrap_or_default();
        Some((status, row.text("gender")?))
    })
    .into_iter()
    .map(|(status, gender, n)| {
        let label = labels::lookup(&POVERTY_STATUS, status.as_str()).unwrap_or_default();
        (label.to_string(), gender, n)
    })
    .collect();

    ChartPanel::new(
        "poverty_status",
        "ស្ថិតិសិក្ខាកាមតាមវេនសិក្សា",
        charts::grouped_bar(groups, "ប័ណ្ណសមធម៍", TRAINEES, labels::gender_label),
    )
}

fn charts(frame: &Frame) -> Vec<ChartPanel> {
    let partner_types = if frame.all_null("partner_type") {
        charts::placeholder()
    } else {
        let counts = aggregate::value_counts_by(frame, |row| {
            Some(labels::partner_type_label(row.int("partner_type")).to_string())
        });
        charts::counts_pie(counts, charts::DONUT)
    };

    vec![
        ChartPanel::new(
            "gender",
            "ការបែងចែកសិក្ខាកាមតាមភេទ",
            charts::gender_pie(frame, "gender", charts::PIE),
        ),
        poverty_chart(frame),
        ChartPanel::new(
            "province",
            "ស្ថិតិសិស្សតាមខេត្ត/ក្រុង",
            charts::column_bar(frame, "province_name", &BarOptions::new("ខេត្ត/ក្រុង", TRAINEES)),
        ),
        ChartPanel::new("partner_type", "ស្ថិតិសិក្ខាកាមតាមតាមវិស័យរបស់ដៃគូសហការ", partner_types),
        ChartPanel::new(
            "partner_name",
            "ស្ថិតិសិក្ខាកាមតាមស្ថានប័នរបស់ដៃគូសហការ (២០)",
            charts::column_bar(
                frame,
                "partner_name",
                &BarOptions::new("ស្ថានប័ននៃដៃគូសហការ", TRAINEES).head(Head::Largest(20)),
            ),
        ),
        ChartPanel::new(
            "major",
            "ស្ថិតិសិក្ខាកាមតាមជំនាញ",
            charts::area(aggregate::value_counts(frame, "major_name"), "ជំនាញ", TRAINEES),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::charts::ChartSpec;
    use serde_json::{Value, json};

    fn interns() -> Frame {
        Frame::from_rows(
            vec![
                "gender".into(),
                "poverty_status".into(),
                "internship_pass_fail".into(),
                "partner_type".into(),
                "major_name".into(),
            ],
            vec![
                vec![json!("female"), json!("POOR_1"), json!(1), json!(5), json!("IT")],
                vec![json!("male"), Value::Null, json!(0), json!(2), json!("IT")],
                vec![json!("female"), json!("POOR_1"), json!(1), Value::Null, json!("Welding")],
            ],
        )
    }

    #[test]
    fn test_kpis() {
        let cards = kpis(&interns());
        assert_eq!(cards[0].display, "3 នាក់");
        assert_eq!(cards[1].display, "2 នាក់");
        assert_eq!(cards[2].display, "2 នាក់");
        assert_eq!(cards[3].value, cards[1].value);
    }

    #[test]
    fn test_poverty_chart_covers_every_status() {
        match poverty_chart(&interns()).chart {
            ChartSpec::Bar { categories, series, .. } => {
                assert_eq!(categories.len(), POVERTY_STATUS.len());
                assert_eq!(categories[2], "គ្រួសារមានប័ណ្ណក្រីក្រកម្រិត១");
                assert_eq!(categories[4], "មិនមានទិន្នន័យ");
                // female series: POOR_1 has two rows
                assert_eq!(series[0].values, vec![0, 0, 2, 0, 0]);
                // male series: the null status lands in the last bucket
                assert_eq!(series[1].values, vec![0, 0, 0, 0, 1]);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
    }

    #[test]
    fn test_partner_type_labels() {
        match &charts(&interns())[3].chart {
            ChartSpec::Pie { slices, .. } => {
                let mut names: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
                names.sort();
                let mut expected = vec![labels::PARTNER_TYPE_OTHER, "ជាមួយវិស័យឯកជន"];
                expected.sort();
                assert_eq!(names, expected);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
    }

    #[test]
    fn test_major_area_ascending() {
        match &charts(&interns())[5].chart {
            ChartSpec::Area { points, .. } => {
                assert_eq!(points[0].x, json!("Welding"));
                assert_eq!(points[1].y, 2);
            }
            other => panic!("unexpected chart: {other:?}"),
        }
    }
}
