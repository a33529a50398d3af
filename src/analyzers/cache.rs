use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tracing::debug;

use crate::analyzers::dashboard::Dashboard;
use crate::dataset::{DateRange, Dataset};
use crate::labels::WeekdayOrigin;

pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Memoises dashboards by clamped date range.
///
/// Bound to one dataset and one weekday origin; a hit is equal to a fresh
/// [`Dashboard::build`]. Capacity `0` disables storage. When full, the
/// oldest insertion is evicted.
pub struct ViewCache {
    capacity: usize,
    origin: WeekdayOrigin,
    entries: HashMap<DateRange, Rc<Dashboard>>,
    order: VecDeque<DateRange>,
    hits: u64,
    misses: u64,
}

impl ViewCache {
    pub fn new(capacity: usize, origin: WeekdayOrigin) -> Self {
        Self {
            capacity,
            origin,
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_build(&mut self, dataset: &Dataset, range: DateRange) -> Rc<Dashboard> {
        let key = match dataset.bounds() {
            Some(bounds) => range.clamp_to(bounds),
            None => range,
        };

        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            debug!(start = %key.start, end = %key.end, "View cache hit");
            return Rc::clone(hit);
        }

        self.misses += 1;
        let dashboard = Rc::new(Dashboard::build(dataset, key, self.origin));
        if self.capacity == 0 {
            return dashboard;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.entries.insert(key, Rc::clone(&dashboard));
        dashboard
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
