use serde::Serialize;
use tracing::debug;

use crate::analyzers::aggregate::{
    hourly_view, monthly_view, season_view, weather_view, weekly_view,
};
use crate::analyzers::types::{HourlyRow, LongRow};
use crate::dataset::{DateRange, Dataset};
use crate::labels::WeekdayOrigin;
use crate::stats::RideTotals;

/// A headline number shown above the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: u64,
}

/// Every derived view for one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Requested range after clamping to the dataset bounds.
    pub range: DateRange,
    pub rows: usize,
    pub totals: RideTotals,
    pub hourly: Vec<HourlyRow>,
    pub monthly: Vec<LongRow>,
    pub weekly: Vec<LongRow>,
    pub weather: Vec<LongRow>,
    pub season: Vec<LongRow>,
}

impl Dashboard {
    /// Filters `dataset` to `range` and computes all views from scratch.
    #[tracing::instrument(skip(dataset), fields(start = %range.start, end = %range.end))]
    pub fn build(dataset: &Dataset, range: DateRange, origin: WeekdayOrigin) -> Self {
        let filtered = dataset.filter(range);
        let records = filtered.records();

        let dashboard = Dashboard {
            range: filtered.range(),
            rows: filtered.len(),
            totals: RideTotals::from_records(records),
            hourly: hourly_view(records),
            monthly: monthly_view(records),
            weekly: weekly_view(records, origin),
            weather: weather_view(records),
            season: season_view(records),
        };

        debug!(
            rows = dashboard.rows,
            total_rides = dashboard.totals.total_rides,
            "Dashboard built"
        );
        dashboard
    }

    pub fn metrics(&self) -> [MetricCard; 3] {
        [
            MetricCard {
                label: "Total Rides",
                value: self.totals.total_rides,
            },
            MetricCard {
                label: "Total Casual Rides",
                value: self.totals.total_casual,
            },
            MetricCard {
                label: "Total Registered Rides",
                value: self.totals.total_registered,
            },
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
