//! Data types used by the aggregation pipeline.

use serde::Serialize;

use crate::parser::RideRecord;

/// A categorical column records can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Hour,
    Month,
    Weekday,
    Weather,
    Season,
}

impl Dimension {
    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Hour => "hr",
            Dimension::Month => "mnth",
            Dimension::Weekday => "weekday",
            Dimension::Weather => "weathersit",
            Dimension::Season => "season",
        }
    }

    pub fn key(self, record: &RideRecord) -> u8 {
        match self {
            Dimension::Hour => record.hr,
            Dimension::Month => record.mnth,
            Dimension::Weekday => record.weekday,
            Dimension::Weather => record.weathersit,
            Dimension::Season => record.season,
        }
    }
}

/// Per-group sums, one per distinct key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupTotals {
    pub key: u8,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl GroupTotals {
    pub fn new(key: u8) -> Self {
        Self {
            key,
            casual: 0,
            registered: 0,
            cnt: 0,
        }
    }

    pub fn add_record(&mut self, record: &RideRecord) {
        self.casual += record.casual;
        self.registered += record.registered;
        self.cnt += record.cnt;
    }

    pub fn count_for(&self, status: RiderStatus) -> u64 {
        match status {
            RiderStatus::Casual => self.casual,
            RiderStatus::Registered => self.registered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiderStatus {
    Casual,
    Registered,
}

impl RiderStatus {
    pub const ALL: [RiderStatus; 2] = [RiderStatus::Casual, RiderStatus::Registered];

    pub fn as_str(self) -> &'static str {
        match self {
            RiderStatus::Casual => "casual",
            RiderStatus::Registered => "registered",
        }
    }
}

/// One row of the hourly view. Kept wide: the hourly chart plots all three sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyRow {
    pub hr: u8,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

impl From<GroupTotals> for HourlyRow {
    fn from(g: GroupTotals) -> Self {
        HourlyRow {
            hr: g.key,
            casual: g.casual,
            registered: g.registered,
            cnt: g.cnt,
        }
    }
}

/// One `(category, status, count)` triple of a long-form view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LongRow {
    pub code: u8,
    pub label: &'static str,
    pub status: RiderStatus,
    pub count: u64,
}
