pub mod json_api;

pub use json_api::{
    classify_event_json, daily_trend_json, event_detail_json, list_devices_json,
    query_events_json, summary_stats_json, ClassifyRequest, ClassifyResponse, DetailRequest,
    DetailResponse, DevicesRequest, DevicesResponse, QueryRequest, QueryResponse, StatsRequest,
    StatsResponse, TrendRequest, TrendResponse, SCHEMA_VERSION,
};
