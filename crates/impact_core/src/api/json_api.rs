//! JSON boundary for presentation layers.
//!
//! Each entry point takes the store plus a request JSON string and returns
//! a response JSON string; errors cross the boundary as plain strings so
//! callers without the crate's error types can surface them directly.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::kinematics::{classify, BiomechanicalModel};
use crate::analysis::trend::{daily_trend, summary_stats, DailyCount, SummaryStats};
use crate::models::{Device, ImpactDetail};
use crate::query::{assemble_detail, query_events, EventBundle, EventFilter, EventRow, Page};
use crate::store::EventStore;

pub const SCHEMA_VERSION: u8 = 1;

fn check_schema(version: u8) -> Result<(), String> {
    if version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {version}"));
    }
    Ok(())
}

fn parse<'a, T: Deserialize<'a>>(request_json: &'a str) -> Result<T, String> {
    serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {e}"))
}

fn respond<T: Serialize>(response: &T) -> Result<String, String> {
    serde_json::to_string(response).map_err(|e| format!("Response serialization failed: {e}"))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub filter: EventFilter,
    pub page: Page,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub schema_version: u8,
    pub total_count: usize,
    pub rows: Vec<EventRow>,
}

/// Filtered, paginated event listing.
pub fn query_events_json(store: &dyn EventStore, request_json: &str) -> Result<String, String> {
    let request: QueryRequest = parse(request_json)?;
    check_schema(request.schema_version)?;

    let result =
        query_events(store, &request.filter, &request.page).map_err(|e| e.to_string())?;
    respond(&QueryResponse {
        schema_version: SCHEMA_VERSION,
        total_count: result.total_count,
        rows: result.rows,
    })
}

#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    pub schema_version: u8,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub stats: SummaryStats,
}

/// Fleet-wide summary statistics.
pub fn summary_stats_json(store: &dyn EventStore, request_json: &str) -> Result<String, String> {
    let request: StatsRequest = parse(request_json)?;
    check_schema(request.schema_version)?;

    let stats = summary_stats(store).map_err(|e| e.to_string())?;
    respond(&StatsResponse { schema_version: SCHEMA_VERSION, stats })
}

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub schema_version: u8,
    pub window_days: u32,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub schema_version: u8,
    pub trend: Vec<DailyCount>,
}

/// Daily impact counts over a rolling window ending now.
pub fn daily_trend_json(store: &dyn EventStore, request_json: &str) -> Result<String, String> {
    let request: TrendRequest = parse(request_json)?;
    check_schema(request.schema_version)?;

    let trend =
        daily_trend(store, request.window_days, Utc::now()).map_err(|e| e.to_string())?;
    respond(&TrendResponse { schema_version: SCHEMA_VERSION, trend })
}

#[derive(Debug, Deserialize)]
pub struct DevicesRequest {
    pub schema_version: u8,
}

#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub schema_version: u8,
    pub devices: Vec<Device>,
}

/// Registered devices, for filter dropdowns and fleet views.
pub fn list_devices_json(store: &dyn EventStore, request_json: &str) -> Result<String, String> {
    let request: DevicesRequest = parse(request_json)?;
    check_schema(request.schema_version)?;

    let devices = store.devices().map_err(|e| e.to_string())?;
    respond(&DevicesResponse { schema_version: SCHEMA_VERSION, devices })
}

#[derive(Debug, Deserialize)]
pub struct DetailRequest {
    pub schema_version: u8,
    pub event_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub schema_version: u8,
    #[serde(flatten)]
    pub bundle: EventBundle,
}

/// Render-ready bundle for one event.
pub fn event_detail_json(store: &dyn EventStore, request_json: &str) -> Result<String, String> {
    let request: DetailRequest = parse(request_json)?;
    check_schema(request.schema_version)?;

    let bundle = assemble_detail(store, request.event_id).map_err(|e| e.to_string())?;
    respond(&DetailResponse { schema_version: SCHEMA_VERSION, bundle })
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub schema_version: u8,
    pub event_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub schema_version: u8,
    pub detail: ImpactDetail,
}

/// Classify a stored event with the default model and persist the derived
/// detail. The write is idempotent, so racing callers converge on the same
/// stored values.
pub fn classify_event_json(store: &dyn EventStore, request_json: &str) -> Result<String, String> {
    let request: ClassifyRequest = parse(request_json)?;
    check_schema(request.schema_version)?;

    let event = store
        .event(request.event_id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("impact event not found: {}", request.event_id))?;

    let waveform = store.time_series(event.id).map_err(|e| e.to_string())?;
    let detail = classify(&event, &waveform, &BiomechanicalModel).map_err(|e| e.to_string())?;
    store.upsert_detail(detail.clone()).map_err(|e| e.to_string())?;
    log::info!(
        "classified event {}: hic={:.1} bric={:.2} severity={:?}",
        event.id,
        detail.hic_value,
        detail.bric_value,
        detail.severity
    );
    respond(&ClassifyResponse { schema_version: SCHEMA_VERSION, detail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImpactEvent;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn seeded_store() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.insert_event(ImpactEvent {
            id,
            device_id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2020, 6, 1, 8, 0, 0).unwrap(),
            intensity: 7.5,
            accel_x: Some(7.0),
            accel_y: Some(1.0),
            accel_z: Some(2.0),
            accel_total: Some(7.4),
            gyro_x: None,
            gyro_y: None,
            gyro_z: None,
            gyro_total: Some(150.0),
            temperature: None,
            pressure: None,
            significant: true,
        });
        (store, id)
    }

    #[test]
    fn query_round_trip() {
        let (store, id) = seeded_store();
        let request = json!({
            "schema_version": 1,
            "filter": { "significant": true },
            "page": { "index": 0, "size": 10 }
        })
        .to_string();

        let response = query_events_json(&store, &request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["total_count"], 1);
        assert_eq!(parsed["rows"][0]["event"]["id"], json!(id.to_string()));
    }

    #[test]
    fn schema_version_is_enforced() {
        let (store, _) = seeded_store();
        let request = json!({
            "schema_version": 9,
            "page": { "index": 0, "size": 10 }
        })
        .to_string();
        let err = query_events_json(&store, &request).unwrap_err();
        assert!(err.contains("schema version"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let (store, _) = seeded_store();
        assert!(query_events_json(&store, "{not json").is_err());
    }

    #[test]
    fn classify_persists_detail() {
        let (store, id) = seeded_store();
        let request = json!({ "schema_version": 1, "event_id": id }).to_string();

        let response = classify_event_json(&store, &request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        // gyro peak 150 deg/s -> bric > 2.0 -> high
        assert_eq!(parsed["detail"]["severity"], "high");

        let stored = store.detail(id).unwrap().expect("detail persisted");
        assert_eq!(stored.event_id, id);

        // Re-classifying converges on the same stored scores.
        classify_event_json(&store, &request).unwrap();
        let again = store.detail(id).unwrap().unwrap();
        assert_eq!(again.hic_value.to_bits(), stored.hic_value.to_bits());
        assert_eq!(again.bric_value.to_bits(), stored.bric_value.to_bits());
    }

    #[test]
    fn classify_uses_stored_waveform() {
        use crate::models::TimeSeriesSample;

        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        let t0 = Utc.with_ymd_and_hms(2020, 6, 1, 8, 0, 0).unwrap();
        // Mild peak on the event record, but a sustained 100 g waveform.
        store.insert_event(ImpactEvent {
            id,
            device_id: Uuid::new_v4(),
            timestamp: t0,
            intensity: 7.5,
            accel_x: None,
            accel_y: None,
            accel_z: None,
            accel_total: None,
            gyro_x: None,
            gyro_y: None,
            gyro_z: None,
            gyro_total: None,
            temperature: None,
            pressure: None,
            significant: true,
        });
        let waveform: Vec<TimeSeriesSample> = (0..=12)
            .map(|k| TimeSeriesSample {
                timestamp: t0 + chrono::Duration::milliseconds(k * 3),
                accel_total: 100.0,
            })
            .collect();
        store.insert_time_series(id, waveform);

        let request = json!({ "schema_version": 1, "event_id": id }).to_string();
        let response = classify_event_json(&store, &request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        // 100 g over the widest window: hic = 100^2.5 * 0.036 = 3600,
        // far above the ~11 a peak-only score would give.
        let hic = parsed["detail"]["hic_value"].as_f64().unwrap();
        assert!((hic - 3600.0).abs() < 1e-6, "hic={hic}");
        assert_eq!(parsed["detail"]["severity"], "high");
    }

    #[test]
    fn detail_of_unknown_event_fails() {
        let (store, _) = seeded_store();
        let request =
            json!({ "schema_version": 1, "event_id": Uuid::new_v4() }).to_string();
        let err = event_detail_json(&store, &request).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn devices_listing_is_name_ordered() {
        use crate::models::OperationMode;
        let store = MemoryStore::new();
        for name in ["Helmet B", "Helmet A"] {
            store.insert_device(crate::models::Device {
                id: Uuid::new_v4(),
                name: name.to_string(),
                mode: OperationMode::Continuous,
                last_seen: None,
            });
        }
        let response =
            list_devices_json(&store, &json!({ "schema_version": 1 }).to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["devices"][0]["name"], "Helmet A");
        assert_eq!(parsed["devices"][1]["name"], "Helmet B");
    }

    #[test]
    fn stats_on_empty_store_are_zeroed() {
        let store = MemoryStore::new();
        let response =
            summary_stats_json(&store, &json!({ "schema_version": 1 }).to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["total_events"], 0);
        assert_eq!(parsed["max_hic"], 0.0);
    }

    #[test]
    fn trend_round_trip() {
        let (store, _) = seeded_store();
        // The seeded event is far in the past relative to Utc::now(), so a
        // short window returns an empty trend; the call itself succeeds.
        let request = json!({ "schema_version": 1, "window_days": 1 }).to_string();
        let response = daily_trend_json(&store, &request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert!(parsed["trend"].as_array().unwrap().is_empty());
    }
}
