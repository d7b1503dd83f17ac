//! # Trend Aggregator
//!
//! Read-only aggregations for the dashboard: daily impact counts over a
//! rolling window and fleet-wide summary statistics. Both tolerate an
//! empty store.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Severity;
use crate::query::EventFilter;
use crate::store::EventStore;

/// One trend bucket: a UTC calendar date with at least one event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Fleet-wide statistics over all classified impacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    /// Row count of the ImpactDetail set.
    pub total_events: usize,
    /// 0.0 when no details exist.
    pub max_hic: f64,
    /// 0.0 when no details exist.
    pub max_bric: f64,
    pub high_severity_count: usize,
}

/// Daily impact counts over `[now - window_days, now]`, bucketed by UTC
/// calendar date, ascending. Dates with zero events are omitted; callers
/// needing a dense series zero-fill themselves.
pub fn daily_trend(
    store: &dyn EventStore,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<Vec<DailyCount>> {
    let filter = EventFilter {
        start_time: Some(now - Duration::days(i64::from(window_days))),
        end_time: Some(now),
        ..EventFilter::default()
    };
    let events = store.events_matching(&filter)?;

    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for event in &events {
        *buckets.entry(event.timestamp.date_naive()).or_insert(0) += 1;
    }

    log::debug!(
        "daily_trend: {} events in {} day window across {} dates",
        events.len(),
        window_days,
        buckets.len()
    );
    Ok(buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect())
}

/// Scan the full ImpactDetail set for maxima and the high-severity count.
/// Never fails on an empty store.
pub fn summary_stats(store: &dyn EventStore) -> Result<SummaryStats> {
    let details = store.details()?;
    let mut stats = SummaryStats {
        total_events: details.len(),
        ..SummaryStats::default()
    };
    for detail in &details {
        stats.max_hic = stats.max_hic.max(detail.hic_value);
        stats.max_bric = stats.max_bric.max(detail.bric_value);
        if detail.severity == Severity::High {
            stats.high_severity_count += 1;
        }
    }
    Ok(stats)
}
