//! Alert aggregation: partitioning derived alerts into buckets.

use crate::domain::events::AlertEntry;

/// Default window separating "upcoming" from "later" alerts.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Derived alerts split around a day window.
///
/// Both buckets preserve the deriver's ascending `days_until` order. An
/// entry with `days_until == 0` is due today; highlighting that is the
/// caller's concern, the aggregator only partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertBuckets {
    /// Alerts due within the window (days_until <= window)
    pub upcoming: Vec<AlertEntry>,
    /// Everything further out
    pub later: Vec<AlertEntry>,
}

/// Partition `alerts` into upcoming (days_until <= `window_days`) and later.
///
/// Assumes the input is already sorted by the deriver; the relative order of
/// entries within each bucket is preserved.
pub fn bucket(alerts: Vec<AlertEntry>, window_days: i64) -> AlertBuckets {
    let (upcoming, later) = alerts
        .into_iter()
        .partition(|alert| alert.days_until <= window_days);
    AlertBuckets { upcoming, later }
}
