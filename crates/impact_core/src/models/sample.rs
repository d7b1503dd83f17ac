use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Channel tag for a raw telemetry scalar.
///
/// Wire names are camelCase to match the ingestion pipeline's `data_type`
/// column values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Temperature,
    Pressure,
    AccelTotal,
    AccelX,
    AccelY,
    AccelZ,
    GyroTotal,
    GyroX,
    GyroY,
    GyroZ,
}

/// One raw sensor reading. Append-only time series keyed by
/// (device, data_type, timestamp); immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawSample {
    pub device_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub data_type: DataType,
    pub value: f64,
}
