//! # Event Query Service
//!
//! Filtered, sorted, paginated reads over the impact-event store, joined
//! with device names and classification details. All operations here are
//! read-only; request state (filter, page) is passed in explicitly, never
//! held in the service.

pub mod detail;


pub use detail::{assemble_detail, EventBundle};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{DataType, ImpactDetail, ImpactEvent, RawSample};
use crate::store::EventStore;

/// Query constraints. Every field is optional; an absent field places no
/// constraint on that dimension. All bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_intensity: Option<f64>,
    /// Tri-state: `Some(true)`/`Some(false)` filter on the flag, `None`
    /// matches both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl EventFilter {
    /// Rejects non-finite and inverted bounds. An empty match is a success,
    /// not an input error, so this is the only validation a filter needs.
    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [
            ("min_intensity", self.min_intensity),
            ("max_intensity", self.max_intensity),
        ] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(CoreError::InvalidInput(format!(
                        "{name} must be finite, got {value}"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_intensity, self.max_intensity) {
            if min > max {
                return Err(CoreError::InvalidInput(format!(
                    "min_intensity {min} exceeds max_intensity {max}"
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(CoreError::InvalidInput(format!(
                    "start_time {start} is after end_time {end}"
                )));
            }
        }
        Ok(())
    }

    /// The predicate shared by row selection and `total_count` — both
    /// always see the same set.
    pub fn matches(&self, event: &ImpactEvent) -> bool {
        if let Some(device_id) = self.device_id {
            if event.device_id != device_id {
                return false;
            }
        }
        if let Some(min) = self.min_intensity {
            if event.intensity < min {
                return false;
            }
        }
        if let Some(max) = self.max_intensity {
            if event.intensity > max {
                return false;
            }
        }
        if let Some(significant) = self.significant {
            if event.significant != significant {
                return false;
            }
        }
        if let Some(start) = self.start_time {
            if event.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if event.timestamp > end {
                return false;
            }
        }
        true
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

/// One result row: the event joined with its device name and detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRow {
    pub event: ImpactEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImpactDetail>,
}

/// A page of rows plus the filtered count before pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<EventRow>,
    pub total_count: usize,
}

/// Sort events into the query contract's total order: timestamp
/// descending, ties broken by event id ascending. The order is a contract,
/// not a default — stable pagination depends on it.
fn sort_newest_first(events: &mut [ImpactEvent]) {
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(a.id.cmp(&b.id)));
}

/// Execute a filtered, paginated query.
///
/// Returns exactly `min(page.size, remaining)` rows and the total count of
/// rows matching the filter before pagination. An empty result set is a
/// valid success. Read-only: nothing in the store is mutated.
pub fn query_events(
    store: &dyn EventStore,
    filter: &EventFilter,
    page: &Page,
) -> Result<QueryResult> {
    filter.validate()?;
    if page.size == 0 {
        return Err(CoreError::InvalidInput("page size must be positive".to_string()));
    }

    let mut events = store.events_matching(filter)?;
    sort_newest_first(&mut events);
    let total_count = events.len();

    let offset = page.index.saturating_mul(page.size);
    let rows = events
        .into_iter()
        .skip(offset)
        .take(page.size)
        .map(|event| {
            let device_name = store.device(event.device_id)?.map(|d| d.name);
            let detail = store.detail(event.id)?;
            Ok(EventRow { event, device_name, detail })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "query_events: page {} ({} rows) of {} matching",
        page.index,
        rows.len(),
        total_count
    );
    Ok(QueryResult { rows, total_count })
}

/// The `limit` most recent events across the fleet, joined like
/// [`query_events`]. Dashboard shorthand for page zero, no filter.
pub fn recent_events(store: &dyn EventStore, limit: usize) -> Result<Vec<EventRow>> {
    let result = query_events(
        store,
        &EventFilter::default(),
        &Page { index: 0, size: limit },
    )?;
    Ok(result.rows)
}

/// Raw telemetry range scan for one device channel, inclusive bounds.
/// Fails with `InvalidInput` when the range is inverted.
pub fn device_samples(
    store: &dyn EventStore,
    device_id: Uuid,
    data_type: DataType,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<RawSample>> {
    if start > end {
        return Err(CoreError::InvalidInput(format!(
            "sample range start {start} is after end {end}"
        )));
    }
    Ok(store.raw_samples(device_id, data_type, start, end)?)
}
