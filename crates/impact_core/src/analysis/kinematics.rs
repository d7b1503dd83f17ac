//! # Kinematics Classifier
//!
//! Maps an impact's acceleration/rotation profile to injury-risk scores
//! (HIC, BrIC) and a severity label.
//!
//! Classification is a pure function: deterministic, idempotent, no side
//! effects. Persisting the resulting [`ImpactDetail`] is the caller's job.

use chrono::Utc;

use crate::error::{CoreError, Result};
use crate::models::{ImpactDetail, ImpactEvent, Severity, TimeSeriesSample};

/// HIC above this is high severity.
pub const HIC_HIGH: f64 = 1000.0;

/// HIC above this (and at most [`HIC_HIGH`]) is moderate severity.
pub const HIC_MODERATE: f64 = 250.0;

/// BrIC above this is high severity.
pub const BRIC_HIGH: f64 = 2.0;

/// BrIC above this (and at most [`BRIC_HIGH`]) is moderate severity.
pub const BRIC_MODERATE: f64 = 1.0;

/// Critical angular velocity for the BrIC denominator, deg/s.
pub const BRIC_CRITICAL_OMEGA: f64 = 66.0;

/// HIC integration window bounds, seconds (HIC15-HIC36).
pub const HIC_WINDOW_MIN_S: f64 = 0.015;
pub const HIC_WINDOW_MAX_S: f64 = 0.036;

/// Detector review threshold: peak resultant acceleration in g above which
/// an event is flagged significant.
pub const SIGNIFICANT_INTENSITY_G: f64 = 5.0;

/// The two injury-risk scores an [`InjuryModel`] produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InjuryScores {
    pub hic: f64,
    pub bric: f64,
}

/// Pluggable biomechanical scoring seam. Implementations receive the full
/// kinematic vector of an event — its peak values plus any captured
/// waveform — and return two non-negative floats; they must be
/// deterministic. An empty `waveform` means none was captured.
pub trait InjuryModel {
    fn score(&self, event: &ImpactEvent, waveform: &[TimeSeriesSample]) -> InjuryScores;
}

/// Default scoring model.
///
/// HIC is the sliding-window head injury criterion over the captured
/// waveform; when no waveform exists the peak intensity is scored as a
/// degenerate one-window profile. BrIC divides the peak angular velocity
/// by the 66 deg/s critical value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiomechanicalModel;

impl BiomechanicalModel {
    /// HIC over an acceleration-time history.
    ///
    /// Scans every sample pair whose spacing falls inside the 15-36 ms
    /// window and returns the maximum of `(mean accel)^2.5 * dt`, with the
    /// mean taken as the trapezoidal integral over the window. `times_s`
    /// must be ascending; returns 0.0 when no pair fits the window.
    pub fn hic_from_series(times_s: &[f64], accel_g: &[f64]) -> f64 {
        let n = times_s.len().min(accel_g.len());
        let mut best = 0.0f64;
        for i in 0..n {
            for j in (i + 1)..n {
                let dt = times_s[j] - times_s[i];
                if dt < HIC_WINDOW_MIN_S {
                    continue;
                }
                if dt > HIC_WINDOW_MAX_S {
                    break;
                }
                let mut integral = 0.0;
                for k in i..j {
                    let step = times_s[k + 1] - times_s[k];
                    integral += 0.5 * (accel_g[k] + accel_g[k + 1]) * step;
                }
                let mean = (integral / dt).max(0.0);
                let hic = mean.powf(2.5) * dt;
                if hic > best {
                    best = hic;
                }
            }
        }
        best
    }

    /// Degenerate HIC for events that carry only a peak value: the peak
    /// held for the widest window.
    pub fn hic_from_peak(peak_accel_g: f64) -> f64 {
        peak_accel_g.max(0.0).powf(2.5) * HIC_WINDOW_MAX_S
    }

    /// BrIC from peak angular velocity in deg/s.
    pub fn bric_from_peak_omega(omega_deg_s: f64) -> f64 {
        omega_deg_s.max(0.0) / BRIC_CRITICAL_OMEGA
    }
}

impl InjuryModel for BiomechanicalModel {
    fn score(&self, event: &ImpactEvent, waveform: &[TimeSeriesSample]) -> InjuryScores {
        // A stored waveform takes precedence; fewer than two samples
        // cannot be integrated, so those fall back to the peak.
        let hic = if waveform.len() >= 2 {
            let t0 = waveform[0].timestamp;
            let times_s: Vec<f64> = waveform
                .iter()
                .map(|s| (s.timestamp - t0).num_microseconds().unwrap_or(0) as f64 / 1e6)
                .collect();
            let accel_g: Vec<f64> = waveform.iter().map(|s| s.accel_total).collect();
            Self::hic_from_series(&times_s, &accel_g)
        } else {
            Self::hic_from_peak(event.accel_total.unwrap_or(event.intensity))
        };
        InjuryScores {
            hic,
            bric: Self::bric_from_peak_omega(event.rotation_magnitude()),
        }
    }
}

/// Fixed severity thresholds. These are a contract, reproduced exactly:
/// `hic > 1000 || bric > 2.0` is High, else `hic > 250 || bric > 1.0` is
/// Moderate, else Low.
pub fn severity_for(hic: f64, bric: f64) -> Severity {
    if hic > HIC_HIGH || bric > BRIC_HIGH {
        Severity::High
    } else if hic > HIC_MODERATE || bric > BRIC_MODERATE {
        Severity::Moderate
    } else {
        Severity::Low
    }
}

/// Whether an intensity crosses the detector's review threshold.
pub fn is_significant(intensity_g: f64) -> bool {
    intensity_g > SIGNIFICANT_INTENSITY_G
}

/// Derive the classification record for one event.
///
/// `waveform` is the event's captured acceleration series, ascending by
/// timestamp; pass an empty slice when none exists and the model scores
/// the peak values instead.
///
/// Rejects non-finite or negative intensity with
/// [`CoreError::InvalidInput`]; never fails for well-formed numeric input,
/// including zero/degenerate kinematics.
pub fn classify<M: InjuryModel>(
    event: &ImpactEvent,
    waveform: &[TimeSeriesSample],
    model: &M,
) -> Result<ImpactDetail> {
    if !event.intensity.is_finite() || event.intensity < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "event {} intensity must be a non-negative number, got {}",
            event.id, event.intensity
        )));
    }
    let scores = model.score(event, waveform);
    Ok(ImpactDetail {
        event_id: event.id,
        hic_value: scores.hic,
        bric_value: scores.bric,
        severity: severity_for(scores.hic, scores.bric),
        created_at: Utc::now(),
    })
}
