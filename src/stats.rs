use serde::Serialize;

use crate::parser::RideRecord;

/// Scalar totals over a set of records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RideTotals {
    pub total_rides: u64,
    pub total_casual: u64,
    pub total_registered: u64,
}

impl RideTotals {
    pub fn from_records(records: &[&RideRecord]) -> Self {
        RideTotals {
            total_rides: total_rides(records),
            total_casual: total_casual(records),
            total_registered: total_registered(records),
        }
    }

    pub fn pct(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn casual_pct(&self) -> f64 {
        Self::pct(self.total_casual, self.total_rides)
    }

    pub fn registered_pct(&self) -> f64 {
        Self::pct(self.total_registered, self.total_rides)
    }
}

/// `Σ cnt`
pub fn total_rides(records: &[&RideRecord]) -> u64 {
    records.iter().map(|r| r.cnt).sum()
}

/// `Σ casual`
pub fn total_casual(records: &[&RideRecord]) -> u64 {
    records.iter().map(|r| r.casual).sum()
}

/// `Σ registered`
pub fn total_registered(records: &[&RideRecord]) -> u64 {
    records.iter().map(|r| r.registered).sum()
}
