//! Chart descriptions for a plotting front end.
//!
//! Nothing here draws; each [`ChartSpec`] carries the title, axes, layout
//! slot and series a charting library needs to render one figure.

use serde::Serialize;

use crate::analyzers::dashboard::Dashboard;
use crate::analyzers::types::{HourlyRow, LongRow, RiderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    GroupedBar,
}

/// Direction the bars (or the x axis of a line) run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Where the figure sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    FullWidth,
    PairLeft,
    PairRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Point {
    pub category: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub name: &'static str,
    pub color: Option<&'static str>,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub kind: ChartKind,
    pub orientation: Orientation,
    pub placement: Placement,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub markers: bool,
    pub show_legend: bool,
    pub reverse_x: bool,
    pub reverse_y: bool,
    pub y_axis_right: bool,
    pub series: Vec<Series>,
}

const HOURLY_COLORS: [&str; 3] = ["skyblue", "orange", "red"];

impl Dashboard {
    /// The five figures of the dashboard page, in page order.
    pub fn charts(&self) -> Vec<ChartSpec> {
        vec![
            hourly_chart(&self.hourly),
            vertical_bar("Monthly Count of Bikeshare Rides", "Month", &self.monthly),
            vertical_bar("Weekly Count of Bikeshare Rides", "Day", &self.weekly),
            ChartSpec {
                placement: Placement::PairLeft,
                ..horizontal_bar("Bikeshare Rides by Weather", "Weather", &self.weather)
            },
            ChartSpec {
                placement: Placement::PairRight,
                reverse_x: true,
                reverse_y: true,
                y_axis_right: true,
                ..horizontal_bar("Bikeshare Rides by Season", "Season", &self.season)
            },
        ]
    }
}

fn hourly_chart(rows: &[HourlyRow]) -> ChartSpec {
    let series_of = |name: &'static str, color: &'static str, value: fn(&HourlyRow) -> u64| Series {
        name,
        color: Some(color),
        points: rows
            .iter()
            .map(|r| Point {
                category: r.hr.to_string(),
                value: value(r),
            })
            .collect(),
    };

    ChartSpec {
        title: "Hourly Count of Bikeshare Rides",
        kind: ChartKind::Line,
        orientation: Orientation::Vertical,
        placement: Placement::FullWidth,
        x_title: "Hour",
        y_title: "Total Rides",
        markers: true,
        show_legend: true,
        reverse_x: false,
        reverse_y: false,
        y_axis_right: false,
        series: vec![
            series_of("casual", HOURLY_COLORS[0], |r| r.casual),
            series_of("registered", HOURLY_COLORS[1], |r| r.registered),
            series_of("cnt", HOURLY_COLORS[2], |r| r.cnt),
        ],
    }
}

fn vertical_bar(title: &'static str, x_title: &'static str, rows: &[LongRow]) -> ChartSpec {
    ChartSpec {
        title,
        kind: ChartKind::GroupedBar,
        orientation: Orientation::Vertical,
        placement: Placement::FullWidth,
        x_title,
        y_title: "Total Rides",
        markers: false,
        show_legend: true,
        reverse_x: false,
        reverse_y: false,
        y_axis_right: false,
        series: status_series(rows),
    }
}

fn horizontal_bar(title: &'static str, y_title: &'static str, rows: &[LongRow]) -> ChartSpec {
    ChartSpec {
        title,
        kind: ChartKind::GroupedBar,
        orientation: Orientation::Horizontal,
        placement: Placement::FullWidth,
        x_title: "Total Rides",
        y_title,
        markers: false,
        show_legend: false,
        reverse_x: false,
        reverse_y: false,
        y_axis_right: false,
        series: status_series(rows),
    }
}

/// Splits a long-form view into one series per status, keeping row order.
fn status_series(rows: &[LongRow]) -> Vec<Series> {
    RiderStatus::ALL
        .iter()
        .map(|&status| Series {
            name: status.as_str(),
            color: None,
            points: rows
                .iter()
                .filter(|r| r.status == status)
                .map(|r| Point {
                    category: r.label.to_string(),
                    value: r.count,
                })
                .collect(),
        })
        .collect()
}
