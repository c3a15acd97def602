pub mod entities;

pub use entities::{
    BarMode, BarSeries, CategoryOrder, ChartPanel, ChartSpec, LineSeries, Orientation, PieSlice,
    Point, ScatterPoint,
};
