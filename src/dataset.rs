//! The immutable dataset handle and the date-range filter over it.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::DatasetError;
use crate::labels::WeekdayOrigin;
use crate::parser::{RideRecord, parse_records};

/// Inclusive `[start, end]` calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// `true` when `start > end`; such a range selects nothing.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Narrows the range to `bounds`. An inverted result stays inverted.
    pub fn clamp_to(self, bounds: DateRange) -> DateRange {
        DateRange {
            start: self.start.max(bounds.start),
            end: self.end.min(bounds.end),
        }
    }
}

/// Loaded once and never mutated; every filter and view borrows from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<RideRecord>,
    bounds: Option<DateRange>,
}

impl Dataset {
    pub fn new(records: Vec<RideRecord>) -> Self {
        let start = records.iter().map(|r| r.dteday).min();
        let end = records.iter().map(|r| r.dteday).max();
        let bounds = start.zip(end).map(|(start, end)| DateRange::new(start, end));
        Self { records, bounds }
    }

    /// Parses a CSV document into a dataset.
    #[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_csv(bytes: &[u8], origin: WeekdayOrigin) -> Result<Self, DatasetError> {
        let records = parse_records(bytes, origin)
            .inspect_err(|e| warn!(line = e.line(), error = %e, "Rejected dataset row"))?;
        let dataset = Self::new(records);
        match dataset.bounds {
            Some(b) => info!(
                rows = dataset.len(),
                min_date = %b.start,
                max_date = %b.end,
                "Dataset loaded"
            ),
            None => warn!("Dataset loaded with no rows"),
        }
        Ok(dataset)
    }

    pub fn records(&self) -> &[RideRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `[min(dteday), max(dteday)]`, or `None` for an empty dataset.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    /// Fills missing ends of a requested range from the dataset bounds.
    ///
    /// Returns `None` only when a bound is missing and the dataset is empty.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<DateRange> {
        let start = start.or(self.bounds.map(|b| b.start))?;
        let end = end.or(self.bounds.map(|b| b.end))?;
        Some(DateRange::new(start, end))
    }

    /// Records whose `dteday` lies in the closed range.
    ///
    /// The range is first clamped to the dataset bounds. An inverted range
    /// gives an empty set rather than an error.
    pub fn filter(&self, range: DateRange) -> FilteredSet<'_> {
        let range = match self.bounds {
            Some(bounds) => range.clamp_to(bounds),
            None => range,
        };

        if range.is_inverted() {
            warn!(start = %range.start, end = %range.end, "Date range selects no days");
            return FilteredSet {
                range,
                records: Vec::new(),
            };
        }

        let records: Vec<&RideRecord> = self
            .records
            .iter()
            .filter(|r| range.contains(r.dteday))
            .collect();

        debug!(start = %range.start, end = %range.end, rows = records.len(), "Filtered dataset");
        FilteredSet { range, records }
    }
}

/// The rows selected by one date range.
#[derive(Debug, Clone)]
pub struct FilteredSet<'a> {
    range: DateRange,
    records: Vec<&'a RideRecord>,
}

impl<'a> FilteredSet<'a> {
    /// The range after clamping to the dataset bounds.
    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn records(&self) -> &[&'a RideRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
