//! Shared hub machinery
//!
//! Every hub variant is a [`HubCore`] parameterized by a [`Policy`]. The core
//! owns the send/subscribe skeleton; the policy only decides what to store and
//! what to emit.
//!
//! # Delivery
//!
//! A single mutex guards [`HubState`]. `send` and `subscribe` update the state
//! and take a subscriber snapshot under it, then append a `Batch` of events
//! for that snapshot to the pending queue, still under the lock. No lock is
//! held while a callback runs.
//!
//! Batches are delivered in queue order by one thread at a time, the drainer.
//! The thread that finds the hub idle becomes the drainer and keeps going
//! until the queue is empty. Any other caller, including a callback of the
//! same hub, returns right after queueing its batch:
//!
//! ```text
//!   send(e)    ─┐ state lock           ┌─ drainer (no lock held)
//!   send(e')   ─┼─► commit ─► pending ─┼─► dispatch(snapshot, events)
//!   subscribe  ─┘   [b0, b1, b2]       └─► dispatch(snapshot, events) ...
//! ```
//!
//! So every subscriber sees batches in commit order, a state change is visible
//! as soon as `send` returns, and no caller ever blocks on a running callback.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::config::HubConfig;
use crate::disposable::{Disposable, Unsubscribe};
use crate::error::HubError;
use crate::event::{Event, Terminal};
use crate::registry::{dispatch, Registry, Subscriber, SubscriptionKey};
use crate::stats::HubMetrics;
use crate::terminal::TerminationState;

/// Variant-specific storage and emission rules
pub(crate) trait Policy<T>: Send + 'static {
    /// Record a value; returns it if it should be broadcast live.
    fn on_next(&mut self, value: T) -> Option<T>;

    /// Events broadcast when the hub terminates, ending with the terminal event.
    fn on_terminal(&mut self, terminal: &Terminal) -> Vec<Event<T>>;

    /// Events replayed to a new subscriber, terminal event included if recorded.
    fn history(&self, terminal: Option<&Terminal>) -> Vec<Event<T>>;

    /// Release stored values on dispose
    fn clear(&mut self);
}

/// Events committed for a fixed set of subscribers
struct Batch<T> {
    targets: Vec<Subscriber<T>>,
    events: Vec<Event<T>>,
    /// Set on a replay batch: the new subscriber is unregistered if its
    /// replay panics.
    rollback: Option<SubscriptionKey>,
}

/// Mutable state of a hub, guarded by the state lock
pub(crate) struct HubState<T, P> {
    pub(crate) disposed: bool,
    pub(crate) termination: TerminationState,
    pub(crate) registry: Registry<T>,
    pub(crate) policy: P,
    pending: VecDeque<Batch<T>>,
    draining: bool,
}

impl<T, P> HubState<T, P> {
    /// Become the drainer if there is work and nobody else is on it
    fn claim_drain(&mut self) -> bool {
        if self.draining || self.pending.is_empty() {
            return false;
        }
        self.draining = true;
        true
    }
}

/// Gives up the drainer role if a callback panics mid-drain.
///
/// Batches still pending stay queued for the next drainer.
struct DrainGuard<'a, T, P> {
    core: &'a HubCore<T, P>,
    finished: bool,
}

impl<T, P> Drop for DrainGuard<'_, T, P> {
    fn drop(&mut self) {
        if !self.finished {
            self.core.state.lock().draining = false;
        }
    }
}

/// Unregisters a subscriber whose replay did not complete
struct Rollback<'a, T, P> {
    core: &'a HubCore<T, P>,
    key: Option<SubscriptionKey>,
}

impl<T, P> Drop for Rollback<'_, T, P> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            tracing::debug!(hub = %self.core.name, key = %key, "Replay panicked, subscriber dropped");
            self.core.remove(key);
        }
    }
}

pub(crate) struct HubCore<T, P> {
    name: Arc<str>,
    variant: &'static str,
    metrics: Option<HubMetrics>,
    state: Mutex<HubState<T, P>>,
}

impl<T, P> HubCore<T, P>
where
    T: Clone + Send + Sync + 'static,
    P: Policy<T>,
{
    pub(crate) fn new(policy: P, config: HubConfig, variant: &'static str) -> Arc<Self> {
        if let Some(metrics) = &config.metrics {
            metrics.hub_created();
        }

        tracing::debug!(hub = %config.name, variant = variant, "Hub created");

        Arc::new(Self {
            name: config.name,
            variant,
            metrics: config.metrics,
            state: Mutex::new(HubState {
                disposed: false,
                termination: TerminationState::new(),
                registry: Registry::new(),
                policy,
                pending: VecDeque::new(),
                draining: false,
            }),
        })
    }

    /// Commit `event`, then deliver it unless another drainer is active
    ///
    /// The hub state reflects the event as soon as this returns.
    pub(crate) fn send(&self, event: Event<T>) {
        let kind = event.kind();
        let mut state = self.state.lock();

        if state.disposed {
            tracing::trace!(hub = %self.name, event = kind, "Event dropped, hub disposed");
            return;
        }

        let (events, terminal) = match event.into_terminal() {
            Err(value) => {
                if state.termination.is_terminated() {
                    tracing::trace!(hub = %self.name, event = kind, "Event dropped, hub terminated");
                    return;
                }
                let events: Vec<Event<T>> =
                    state.policy.on_next(value).map(Event::Next).into_iter().collect();
                (events, false)
            }
            Ok(terminal) => {
                if !state.termination.observe(&terminal) {
                    tracing::trace!(hub = %self.name, event = kind, "Event dropped, hub terminated");
                    return;
                }
                (state.policy.on_terminal(&terminal), true)
            }
        };

        let targets = if events.is_empty() {
            Vec::new()
        } else {
            state.registry.snapshot()
        };

        if terminal {
            state.registry.clear();
            if let Some(metrics) = &self.metrics {
                metrics.subscribers_removed(targets.len());
            }
            tracing::debug!(
                hub = %self.name,
                event = kind,
                subscribers = targets.len(),
                "Hub terminated"
            );
        }

        if let Some(metrics) = &self.metrics {
            metrics.event_committed();
        }
        tracing::trace!(hub = %self.name, event = kind, subscribers = targets.len(), "Event committed");

        if !targets.is_empty() {
            state.pending.push_back(Batch {
                targets,
                events,
                rollback: None,
            });
        }

        let drain = state.claim_drain();
        drop(state);

        if drain {
            self.drain();
        }
    }

    /// Register `subscriber` and queue its replay
    ///
    /// History and registration happen under one lock, so the subscriber sees
    /// every value exactly once across replay and live delivery.
    pub(crate) fn subscribe(self: &Arc<Self>, subscriber: Subscriber<T>) -> Disposable {
        let mut state = self.state.lock();

        let (history, key) = if state.disposed {
            tracing::debug!(hub = %self.name, "Subscriber rejected, hub disposed");
            (vec![Event::Error(HubError::Disposed)], None)
        } else {
            let history = state.policy.history(state.termination.get());
            if state.termination.is_terminated() {
                tracing::debug!(
                    hub = %self.name,
                    replayed = history.len(),
                    "Subscriber attached to terminated hub"
                );
                (history, None)
            } else {
                let key = state.registry.insert(Arc::clone(&subscriber));
                if let Some(metrics) = &self.metrics {
                    metrics.subscriber_added();
                }
                tracing::debug!(
                    hub = %self.name,
                    key = %key,
                    subscribers = state.registry.len(),
                    replayed = history.len(),
                    "Subscriber added"
                );
                (history, Some(key))
            }
        };

        if !history.is_empty() {
            state.pending.push_back(Batch {
                targets: vec![subscriber],
                events: history,
                rollback: key,
            });
        }

        let drain = state.claim_drain();
        drop(state);

        if drain {
            self.drain();
        }

        match key {
            Some(key) => {
                let weak: Weak<HubCore<T, P>> = Arc::downgrade(self);
                Disposable::new(weak, key)
            }
            None => Disposable::noop(),
        }
    }

    /// Tear the hub down permanently
    ///
    /// Registered subscribers are dropped without being notified. Batches
    /// already committed are still delivered. Idempotent.
    pub(crate) fn dispose(&self) {
        let mut state = self.state.lock();
        if state.disposed {
            return;
        }

        state.disposed = true;
        let removed = state.registry.len();
        state.registry.clear();
        state.policy.clear();
        drop(state);

        if let Some(metrics) = &self.metrics {
            metrics.subscribers_removed(removed);
        }
        tracing::debug!(hub = %self.name, dropped_subscribers = removed, "Hub disposed");
    }

    fn drain(&self) {
        let mut guard = DrainGuard {
            core: self,
            finished: false,
        };

        loop {
            let next = {
                let mut state = self.state.lock();
                let next = state.pending.pop_front();
                if next.is_none() {
                    state.draining = false;
                }
                next
            };

            match next {
                Some(batch) => self.deliver(batch),
                None => break,
            }
        }

        guard.finished = true;
    }

    fn deliver(&self, batch: Batch<T>) {
        let mut rollback = Rollback {
            core: self,
            key: batch.rollback,
        };

        for event in &batch.events {
            dispatch(&batch.targets, event);
            if let Some(metrics) = &self.metrics {
                metrics.delivered(batch.targets.len());
            }
        }

        rollback.key = None;
    }
}

impl<T, P> HubCore<T, P> {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Remove a subscriber; unknown keys are ignored
    pub(crate) fn remove(&self, key: SubscriptionKey) {
        let mut state = self.state.lock();
        if state.registry.remove(key) {
            let remaining = state.registry.len();
            drop(state);

            if let Some(metrics) = &self.metrics {
                metrics.subscribers_removed(1);
            }
            tracing::debug!(
                hub = %self.name,
                key = %key,
                subscribers = remaining,
                "Subscriber removed"
            );
        }
    }

    /// Run `f` against the state under the state lock
    ///
    /// `f` must not call back into the hub.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&HubState<T, P>) -> R) -> R {
        let state = self.state.lock();
        f(&*state)
    }
}

impl<T, P> Unsubscribe for HubCore<T, P>
where
    T: Send + Sync,
    P: Send,
{
    fn unsubscribe(&self, key: SubscriptionKey) {
        self.remove(key);
    }
}

impl<T, P> fmt::Debug for HubCore<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct(self.variant)
            .field("name", &self.name)
            .field("subscribers", &state.registry.len())
            .field("terminated", &state.termination.is_terminated())
            .field("disposed", &state.disposed)
            .finish()
    }
}

impl<T, P> Drop for HubCore<T, P> {
    fn drop(&mut self) {
        if let Some(metrics) = &self.metrics {
            let registered = self.state.get_mut().registry.len();
            metrics.subscribers_removed(registered);
            metrics.hub_dropped();
        }
        tracing::debug!(hub = %self.name, "Hub dropped");
    }
}
