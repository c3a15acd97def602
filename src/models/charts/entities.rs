//! Chart descriptions handed to the frontend renderer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub enum BarMode {
    Single,
    Group,
}

// Axis ordering of bar categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub enum CategoryOrder {
    Given,
    TotalAscending,
    TotalDescending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub struct Point {
    pub x: Value,
    pub y: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub struct ScatterPoint {
    pub x: f64,
    pub y: u64,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub enum ChartSpec {
    /// `hole` 0 renders a pie, 0.5 a donut
    Pie { hole: f64, slices: Vec<PieSlice> },
    Bar {
        orientation: Orientation,
        x_label: String,
        y_label: String,
        categories: Vec<String>,
        series: Vec<BarSeries>,
        barmode: BarMode,
        category_order: CategoryOrder,
    },
    Line {
        x_label: String,
        y_label: String,
        series: Vec<LineSeries>,
        markers: bool,
    },
    Scatter {
        x_label: String,
        y_label: String,
        points: Vec<ScatterPoint>,
    },
    Area {
        x_label: String,
        y_label: String,
        points: Vec<Point>,
    },
    /// Missing or all-null source column
    Placeholder { message: String },
}

impl ChartSpec {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartSpec::Placeholder { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chart.ts")]
pub struct ChartPanel {
    pub id: String,
    pub title: String,
    pub chart: ChartSpec,
}

impl ChartPanel {
    pub fn new(id: impl Into<String>, title: impl Into<String>, chart: ChartSpec) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            chart,
        }
    }
}
