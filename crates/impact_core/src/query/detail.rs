use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{Device, ImpactDetail, ImpactEvent, TimeSeriesSample};
use crate::store::EventStore;

/// Render-ready bundle for one event's detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventBundle {
    pub event: ImpactEvent,
    /// Absent when classification is still pending. Not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ImpactDetail>,
    /// Falls back to [`Device::unknown`] when the device record is gone.
    pub device: Device,
    /// Never empty: a missing waveform is replaced by a single point from
    /// the event's own timestamp and intensity, so visualization code has
    /// a uniform series to render.
    pub time_series: Vec<TimeSeriesSample>,
}

/// Gather one event's classification, device metadata, and waveform.
///
/// Unlike an empty filtered query, a missing event id here is a hard
/// [`CoreError::NotFound`] — a specific entity was requested.
pub fn assemble_detail(store: &dyn EventStore, event_id: Uuid) -> Result<EventBundle> {
    let event = store
        .event(event_id)?
        .ok_or(CoreError::NotFound { entity: "impact event", id: event_id })?;

    let detail = store.detail(event_id)?;
    let device = store
        .device(event.device_id)?
        .unwrap_or_else(|| Device::unknown(event.device_id));

    let mut time_series = store.time_series(event_id)?;
    if time_series.is_empty() {
        time_series.push(TimeSeriesSample {
            timestamp: event.timestamp,
            accel_total: event.intensity,
        });
    }

    Ok(EventBundle { event, detail, device, time_series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OperationMode, Severity};
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn fixture() -> (MemoryStore, ImpactEvent) {
        let store = MemoryStore::new();
        let event = ImpactEvent {
            id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2026, 4, 2, 14, 30, 0).unwrap(),
            intensity: 8.4,
            accel_x: Some(7.9),
            accel_y: Some(1.2),
            accel_z: Some(-0.4),
            accel_total: Some(8.1),
            gyro_x: None,
            gyro_y: None,
            gyro_z: None,
            gyro_total: Some(95.0),
            temperature: Some(24.5),
            pressure: None,
            significant: true,
        };
        store.insert_event(event.clone());
        (store, event)
    }

    #[test]
    fn missing_event_is_not_found() {
        let store = MemoryStore::new();
        let err = assemble_detail(&store, Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_waveform_synthesizes_single_point() {
        let (store, event) = fixture();
        let bundle = assemble_detail(&store, event.id).unwrap();
        assert_eq!(
            bundle.time_series,
            vec![TimeSeriesSample { timestamp: event.timestamp, accel_total: event.intensity }]
        );
    }

    #[test]
    fn stored_waveform_passes_through() {
        let (store, event) = fixture();
        let series = vec![
            TimeSeriesSample { timestamp: event.timestamp, accel_total: 8.1 },
            TimeSeriesSample {
                timestamp: event.timestamp + Duration::milliseconds(10),
                accel_total: 6.3,
            },
        ];
        store.insert_time_series(event.id, series.clone());

        let bundle = assemble_detail(&store, event.id).unwrap();
        assert_eq!(bundle.time_series, series);
    }

    #[test]
    fn missing_device_degrades_to_placeholder() {
        let (store, event) = fixture();
        let bundle = assemble_detail(&store, event.id).unwrap();
        assert_eq!(bundle.device.id, event.device_id);
        assert_eq!(bundle.device.name, "Unknown device");
    }

    #[test]
    fn detail_and_device_join_when_present() {
        let (store, event) = fixture();
        store.insert_device(Device {
            id: event.device_id,
            name: "Helmet 12".to_string(),
            mode: OperationMode::Impact,
            last_seen: Some(event.timestamp),
        });
        store
            .upsert_detail(ImpactDetail {
                event_id: event.id,
                hic_value: 410.0,
                bric_value: 1.4,
                severity: Severity::Moderate,
                created_at: event.timestamp,
            })
            .unwrap();

        let bundle = assemble_detail(&store, event.id).unwrap();
        assert_eq!(bundle.device.name, "Helmet 12");
        assert_eq!(bundle.detail.unwrap().severity, Severity::Moderate);
    }
}
