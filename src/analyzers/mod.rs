//! Ride aggregation.
//!
//! Groups a filtered record set along each dashboard dimension, reshapes the
//! sums into the long form the bar charts consume, and bundles every view of
//! one date range into a [`dashboard::Dashboard`].

pub mod aggregate;
pub mod cache;
pub mod charts;
pub mod dashboard;
pub mod types;
