//! # impact_core - Impact Event Analysis & Query Engine
//!
//! Ingest-side detection writes impact events into a backing store; this
//! crate derives injury-risk metrics (HIC/BrIC), infers impact direction,
//! and serves the filtered/paginated/aggregated views a dashboard renders.
//!
//! ## Design
//! - Pure, deterministic classification (same event = same scores)
//! - Read-only queries against an [`EventStore`] collaborator; no shared
//!   mutable state inside the core
//! - Plain serde entities at every boundary, no framework types

pub mod analysis;
pub mod api;
pub mod error;
pub mod models;
pub mod query;
pub mod store;

// Re-export the main API surface
pub use analysis::direction::{direction_distribution, estimate_direction, Direction};
pub use analysis::kinematics::{
    classify, is_significant, severity_for, BiomechanicalModel, InjuryModel, InjuryScores,
};
pub use analysis::trend::{daily_trend, summary_stats, DailyCount, SummaryStats};
pub use api::{
    classify_event_json, daily_trend_json, event_detail_json, list_devices_json,
    query_events_json, summary_stats_json,
};
pub use error::{CoreError, Result};
pub use models::{
    DataType, Device, ImpactDetail, ImpactEvent, OperationMode, RawSample, Severity,
    TimeSeriesSample,
};
pub use query::{
    assemble_detail, device_samples, query_events, recent_events, EventBundle, EventFilter,
    EventRow, Page, QueryResult,
};
pub use store::{EventStore, MemoryStore, StoreError, StoreResult};
