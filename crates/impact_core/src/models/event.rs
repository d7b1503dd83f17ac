use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Injury-risk label derived from HIC/BrIC. The ordering is meaningful:
/// `Low < Moderate < High`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

/// A discrete impact created by the upstream threshold detector.
///
/// Immutable after creation except for the derived `significant` flag.
/// Per-axis kinematics and environmental readings are optional: older
/// firmware reports only the peak intensity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactEvent {
    pub id: Uuid,
    pub device_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Peak resultant acceleration magnitude in g.
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accel_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accel_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accel_z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accel_total: Option<f64>,
    /// Angular velocity components in deg/s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyro_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyro_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyro_z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gyro_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Set by the detector when intensity crosses the review threshold.
    pub significant: bool,
}

impl ImpactEvent {
    /// Acceleration components, if the firmware reported any of them.
    /// Missing axes are read as 0.0 once at least one axis is present.
    pub fn acceleration_axes(&self) -> Option<(f64, f64, f64)> {
        if self.accel_x.is_none() && self.accel_y.is_none() && self.accel_z.is_none() {
            return None;
        }
        Some((
            self.accel_x.unwrap_or(0.0),
            self.accel_y.unwrap_or(0.0),
            self.accel_z.unwrap_or(0.0),
        ))
    }

    /// Peak angular velocity magnitude in deg/s. Prefers the reported
    /// resultant, falls back to the component norm, then to zero.
    pub fn rotation_magnitude(&self) -> f64 {
        if let Some(total) = self.gyro_total {
            return total;
        }
        match (self.gyro_x, self.gyro_y, self.gyro_z) {
            (None, None, None) => 0.0,
            (x, y, z) => {
                let (x, y, z) = (x.unwrap_or(0.0), y.unwrap_or(0.0), z.unwrap_or(0.0));
                (x * x + y * y + z * z).sqrt()
            }
        }
    }
}

/// Derived classification record, one-to-one with an [`ImpactEvent`].
/// Never mutated after creation; re-deriving from the same event is
/// byte-identical in `hic_value`/`bric_value`/`severity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactDetail {
    pub event_id: Uuid,
    pub hic_value: f64,
    pub bric_value: f64,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// One point of an event's fine-grained acceleration waveform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesSample {
    pub timestamp: DateTime<Utc>,
    /// Resultant acceleration in g.
    pub accel_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Moderate);
        assert!(Severity::Moderate < Severity::High);
    }

    #[test]
    fn severity_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        let parsed: Severity = serde_json::from_str("\"moderate\"").unwrap();
        assert_eq!(parsed, Severity::Moderate);
    }

    #[test]
    fn rotation_magnitude_prefers_reported_total() {
        let mut event = test_event();
        event.gyro_total = Some(120.0);
        event.gyro_x = Some(3.0);
        assert_eq!(event.rotation_magnitude(), 120.0);
    }

    #[test]
    fn rotation_magnitude_from_components() {
        let mut event = test_event();
        event.gyro_x = Some(3.0);
        event.gyro_y = Some(4.0);
        assert!((event.rotation_magnitude() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn acceleration_axes_absent_when_unreported() {
        let event = test_event();
        assert!(event.acceleration_axes().is_none());
    }

    fn test_event() -> ImpactEvent {
        ImpactEvent {
            id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            intensity: 6.2,
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
        }
    }
}
