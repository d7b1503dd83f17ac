//! Plain data entities shared by the query, analysis, and store layers.
//!
//! Everything here is framework-agnostic: serde-serializable structs and
//! closed enums, no store handles or presentation types.

pub mod device;
pub mod event;
pub mod sample;

pub use device::{Device, OperationMode};
pub use event::{ImpactDetail, ImpactEvent, Severity, TimeSeriesSample};
pub use sample::{DataType, RawSample};
