use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a device reports telemetry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    /// Streams samples continuously.
    Continuous,
    /// Reports only when an impact trips the onboard threshold.
    Impact,
}

/// A registered wearable/embedded sensor unit. Owned by the fleet layer;
/// read-only to this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    pub mode: OperationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Device {
    /// Placeholder for events whose device record is gone. Detail assembly
    /// degrades to this instead of failing.
    pub fn unknown(id: Uuid) -> Self {
        Self {
            id,
            name: "Unknown device".to_string(),
            mode: OperationMode::Impact,
            last_seen: None,
        }
    }
}
