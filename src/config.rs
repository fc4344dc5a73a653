//! Hub configuration

use std::sync::Arc;

use crate::stats::HubMetrics;

/// Default hub name used in log records
pub const DEFAULT_HUB_NAME: &str = "hub";

/// Options shared by every hub variant
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Name attached to every log record emitted by the hub
    pub name: Arc<str>,

    /// Counters updated by the hub (None = no instrumentation)
    pub metrics: Option<HubMetrics>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            name: Arc::from(DEFAULT_HUB_NAME),
            metrics: None,
        }
    }
}

impl HubConfig {
    /// Create a config with a custom name
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            ..Default::default()
        }
    }

    /// Set the hub name
    pub fn name(mut self, name: impl AsRef<str>) -> Self {
        self.name = Arc::from(name.as_ref());
        self
    }

    /// Report into the given counters
    pub fn metrics(mut self, metrics: HubMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
