use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{EventStore, StoreError, StoreResult};
use crate::models::{DataType, Device, ImpactDetail, ImpactEvent, RawSample, TimeSeriesSample};
use crate::query::EventFilter;

/// Thread-safe in-memory store.
///
/// Backs the test suite and embedders that keep the event log in process.
/// All reads clone out of the lock; no reference escapes the guard.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    devices: HashMap<Uuid, Device>,
    events: HashMap<Uuid, ImpactEvent>,
    details: HashMap<Uuid, ImpactDetail>,
    series: HashMap<Uuid, Vec<TimeSeriesSample>>,
    samples: Vec<RawSample>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_device(&self, device: Device) {
        self.write().devices.insert(device.id, device);
    }

    pub fn insert_event(&self, event: ImpactEvent) {
        self.write().events.insert(event.id, event);
    }

    /// Replaces any waveform previously stored for the event.
    pub fn insert_time_series(&self, event_id: Uuid, mut samples: Vec<TimeSeriesSample>) {
        samples.sort_by_key(|s| s.timestamp);
        self.write().series.insert(event_id, samples);
    }

    pub fn insert_raw_sample(&self, sample: RawSample) {
        self.write().samples.push(sample);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        // A poisoned lock means a writer panicked mid-insert; the data is
        // plain-old-data so the map itself is still consistent.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventStore for MemoryStore {
    fn device(&self, id: Uuid) -> StoreResult<Option<Device>> {
        Ok(self.read().devices.get(&id).cloned())
    }

    fn devices(&self) -> StoreResult<Vec<Device>> {
        let mut devices: Vec<Device> = self.read().devices.values().cloned().collect();
        devices.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(devices)
    }

    fn event(&self, id: Uuid) -> StoreResult<Option<ImpactEvent>> {
        Ok(self.read().events.get(&id).cloned())
    }

    fn events_matching(&self, filter: &EventFilter) -> StoreResult<Vec<ImpactEvent>> {
        Ok(self
            .read()
            .events
            .values()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect())
    }

    fn detail(&self, event_id: Uuid) -> StoreResult<Option<ImpactDetail>> {
        Ok(self.read().details.get(&event_id).cloned())
    }

    fn details(&self) -> StoreResult<Vec<ImpactDetail>> {
        Ok(self.read().details.values().cloned().collect())
    }

    fn upsert_detail(&self, detail: ImpactDetail) -> StoreResult<()> {
        let mut inner = self.write();
        if !inner.events.contains_key(&detail.event_id) {
            return Err(StoreError::Write(format!(
                "no impact event {} for detail",
                detail.event_id
            )));
        }
        inner.details.insert(detail.event_id, detail);
        Ok(())
    }

    fn time_series(&self, event_id: Uuid) -> StoreResult<Vec<TimeSeriesSample>> {
        Ok(self.read().series.get(&event_id).cloned().unwrap_or_default())
    }

    fn raw_samples(
        &self,
        device_id: Uuid,
        data_type: DataType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<RawSample>> {
        let mut samples: Vec<RawSample> = self
            .read()
            .samples
            .iter()
            .filter(|s| {
                s.device_id == device_id
                    && s.data_type == data_type
                    && s.timestamp >= start
                    && s.timestamp <= end
            })
            .cloned()
            .collect();
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }
}
