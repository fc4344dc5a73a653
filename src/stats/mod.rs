//! Hub instrumentation

pub mod metrics;

pub use metrics::{HubMetrics, HubMetricsSnapshot};
