//! Counters for hub instrumentation
//!
//! A [`HubMetrics`] handle is passed to hubs through
//! [`HubConfig::metrics`](crate::HubConfig::metrics). Several hubs may share
//! one handle; every clone points at the same counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    hubs_created: AtomicU64,
    hubs_live: AtomicU64,
    subscribers_active: AtomicU64,
    events_committed: AtomicU64,
    deliveries: AtomicU64,
}

/// Shared hub counters
#[derive(Debug, Clone, Default)]
pub struct HubMetrics {
    counters: Arc<Counters>,
}

/// Point-in-time copy of [`HubMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubMetricsSnapshot {
    /// Hubs ever constructed with this handle
    pub hubs_created: u64,
    /// Hubs constructed and not yet dropped
    pub hubs_live: u64,
    /// Subscribers currently registered across all hubs
    pub subscribers_active: u64,
    /// Events accepted by `send` (dropped sends are not counted)
    pub events_committed: u64,
    /// Callback invocations, replay included
    pub deliveries: u64,
}

impl HubMetrics {
    /// Create a fresh set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every counter
    pub fn snapshot(&self) -> HubMetricsSnapshot {
        let c = &self.counters;
        HubMetricsSnapshot {
            hubs_created: c.hubs_created.load(Ordering::Relaxed),
            hubs_live: c.hubs_live.load(Ordering::Relaxed),
            subscribers_active: c.subscribers_active.load(Ordering::Relaxed),
            events_committed: c.events_committed.load(Ordering::Relaxed),
            deliveries: c.deliveries.load(Ordering::Relaxed),
        }
    }

    /// Check if two handles share the same counters
    pub fn same_counters(&self, other: &HubMetrics) -> bool {
        Arc::ptr_eq(&self.counters, &other.counters)
    }

    pub(crate) fn hub_created(&self) {
        self.counters.hubs_created.fetch_add(1, Ordering::Relaxed);
        self.counters.hubs_live.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn hub_dropped(&self) {
        self.counters.hubs_live.fetch_sub(1, Ordering::Relaxed);
    }

    pub(crate) fn subscriber_added(&self) {
        self.counters
            .subscribers_active
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn subscribers_removed(&self, count: usize) {
        if count > 0 {
            self.counters
                .subscribers_active
                .fetch_sub(count as u64, Ordering::Relaxed);
        }
    }

    pub(crate) fn event_committed(&self) {
        self.counters
            .events_committed
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn delivered(&self, count: usize) {
        if count > 0 {
            self.counters
                .deliveries
                .fetch_add(count as u64, Ordering::Relaxed);
        }
    }
}
