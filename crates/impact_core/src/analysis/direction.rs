//! # Direction Estimator
//!
//! Infers the discrete impact direction from the dominant acceleration
//! axis. Ambiguous inputs are reported as [`Direction::Undetermined`]
//! rather than guessed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ImpactEvent;

/// Discrete impact direction. Closed set; presentation code matches on the
/// variants instead of free-form strings.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Front,
    Back,
    Right,
    Left,
    Up,
    Down,
    /// No single axis strictly dominates (ties, the zero vector, or
    /// non-finite components). A valid output, not an error.
    Undetermined,
}

/// Dominant-axis direction estimate.
///
/// The axis whose absolute value strictly exceeds both others selects the
/// label pair (`x` -> Right/Left, `y` -> Front/Back, `z` -> Up/Down); its
/// sign picks the label. Anything else is [`Direction::Undetermined`].
pub fn estimate_direction(ax: f64, ay: f64, az: f64) -> Direction {
    let (x, y, z) = (ax.abs(), ay.abs(), az.abs());
    if x > y && x > z {
        if ax > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if y > x && y > z {
        if ay > 0.0 {
            Direction::Front
        } else {
            Direction::Back
        }
    } else if z > x && z > y {
        if az > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    } else {
        Direction::Undetermined
    }
}

/// Count estimated directions over a batch of events.
///
/// Events without any axis data are skipped; events with partial axis data
/// read missing axes as 0.0.
pub fn direction_distribution(events: &[ImpactEvent]) -> BTreeMap<Direction, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        if let Some((ax, ay, az)) = event.acceleration_axes() {
            *counts.entry(estimate_direction(ax, ay, az)).or_insert(0) += 1;
        }
    }
    counts
}
