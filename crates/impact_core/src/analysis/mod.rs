//! # Analysis Module
//!
//! Pure computations and read-only aggregations over the impact store.
//!
//! ## Submodules
//!
//! - `kinematics` - HIC/BrIC scoring and severity classification
//! - `direction` - dominant-axis impact direction estimation
//! - `trend` - daily trend bucketing and summary statistics

pub mod direction;
pub mod kinematics;
pub mod trend;
