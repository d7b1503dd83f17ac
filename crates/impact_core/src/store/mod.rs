//! Data-store seam.
//!
//! The engine is agnostic to the backing store's wire protocol or
//! persistence format; it consumes the [`EventStore`] trait and nothing
//! else. [`MemoryStore`] is the bundled implementation used by tests and
//! embedders without a database.

pub mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{DataType, Device, ImpactDetail, ImpactEvent, RawSample, TimeSeriesSample};
use crate::query::EventFilter;

/// Failure of the backing store. Propagated unmodified by the core;
/// retries and timeouts belong to the store-access layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store query failed: {0}")]
    Query(String),

    #[error("store write failed: {0}")]
    Write(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read access to the telemetry entities plus the one derived-data write
/// this core needs (`upsert_detail`).
///
/// Implementations must make `upsert_detail` idempotent: re-writing the
/// same computed detail for the same event is a no-op in effect, so
/// concurrent callers racing to classify one event cannot diverge.
pub trait EventStore: Send + Sync {
    fn device(&self, id: Uuid) -> StoreResult<Option<Device>>;

    fn devices(&self) -> StoreResult<Vec<Device>>;

    fn event(&self, id: Uuid) -> StoreResult<Option<ImpactEvent>>;

    /// All events matching the filter, in no particular order. Sorting and
    /// pagination are applied by the query service on top.
    fn events_matching(&self, filter: &EventFilter) -> StoreResult<Vec<ImpactEvent>>;

    fn detail(&self, event_id: Uuid) -> StoreResult<Option<ImpactDetail>>;

    fn details(&self) -> StoreResult<Vec<ImpactDetail>>;

    fn upsert_detail(&self, detail: ImpactDetail) -> StoreResult<()>;

    /// Fine-grained waveform for one event, ascending by timestamp.
    /// An empty vec is valid (no waveform was captured).
    fn time_series(&self, event_id: Uuid) -> StoreResult<Vec<TimeSeriesSample>>;

    /// Raw telemetry range scan for one device channel, inclusive bounds,
    /// ascending by timestamp.
    fn raw_samples(
        &self,
        device_id: Uuid,
        data_type: DataType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<RawSample>>;
}
