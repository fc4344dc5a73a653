//! Latest-value hub
//!
//! A behavior hub always holds a value: it is seeded at construction and
//! replaced by every `Next`. New subscribers receive the current value first.
//! Once the hub has failed, new subscribers receive only the error.

use std::sync::Arc;

use crate::buffer::ReplayBuffer;
use crate::config::HubConfig;
use crate::error::ValueError;
use crate::event::{Event, Terminal};

use super::core::{HubCore, Policy};

pub(crate) struct BehaviorPolicy<T> {
    current: ReplayBuffer<T>,
}

impl<T: Clone + Send + 'static> Policy<T> for BehaviorPolicy<T> {
    fn on_next(&mut self, value: T) -> Option<T> {
        self.current.push(value.clone());
        Some(value)
    }

    fn on_terminal(&mut self, terminal: &Terminal) -> Vec<Event<T>> {
        vec![terminal.to_event()]
    }

    fn history(&self, terminal: Option<&Terminal>) -> Vec<Event<T>> {
        match terminal {
            // Error takes priority over the stale value
            Some(terminal) if terminal.is_error() => vec![terminal.to_event()],
            _ => {
                let mut history: Vec<Event<T>> =
                    self.current.latest().cloned().map(Event::Next).into_iter().collect();
                history.extend(terminal.map(Terminal::to_event));
                history
            }
        }
    }

    fn clear(&mut self) {
        self.current.clear();
    }
}

/// Hub that remembers and replays its most recent value
pub struct BehaviorHub<T> {
    core: Arc<HubCore<T, BehaviorPolicy<T>>>,
}

impl<T> BehaviorHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a hub holding `seed`
    pub fn new(seed: T) -> Self {
        Self::with_config(seed, HubConfig::default())
    }

    pub fn with_config(seed: T, config: HubConfig) -> Self {
        let policy = BehaviorPolicy {
            current: ReplayBuffer::seeded(seed),
        };
        Self {
            core: HubCore::new(policy, config, "BehaviorHub"),
        }
    }

    /// Current value
    ///
    /// Still available after successful completion. Fails if the hub ended
    /// with an error or has been disposed.
    pub fn value(&self) -> Result<T, ValueError> {
        self.core.with_state(|state| {
            if state.disposed {
                return Err(ValueError::Disposed);
            }
            if let Some(Terminal::Error(err)) = state.termination.get() {
                return Err(ValueError::Terminated(err.clone()));
            }
            state
                .policy
                .current
                .latest()
                .cloned()
                .ok_or(ValueError::Disposed)
        })
    }

    /// Name used in log records
    pub fn name(&self) -> &str {
        self.core.name()
    }
}

delegate_hub!(BehaviorHub);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::error::HubError;
    use crate::hub::Hub;
    use crate::test_util::recorder;

    #[test]
    fn test_seed_is_value() {
        let hub = BehaviorHub::new(0);
        assert_eq!(hub.value().unwrap(), 0);
    }

    #[test]
    fn test_value_updated_before_subscribers_notified() {
        let hub = BehaviorHub::new(0);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let observer = hub.clone();
        let sink = Arc::clone(&seen);
        hub.subscribe(move |event: &Event<i32>| {
            if let Event::Next(v) = event {
                sink.lock().push((*v, observer.value().unwrap()));
            }
        });

        hub.on_next(1);
        assert_eq!(hub.value().unwrap(), 1);
        // Seed replay, then live value; the hub already held each one
        assert_eq!(*seen.lock(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_subscriber_receives_current_value_first() {
        let hub = BehaviorHub::new("seed");
        hub.on_next("a");
        hub.on_next("b");

        let (log, record) = recorder();
        hub.subscribe(record);
        hub.on_next("c");

        assert_eq!(*log.lock(), vec![Event::Next("b"), Event::Next("c")]);
    }

    #[test]
    fn test_subscribe_after_completion_gets_value_then_completed() {
        let hub = BehaviorHub::new(1);
        hub.on_next(2);
        hub.on_completed();

        let (log, record) = recorder();
        let handle = hub.subscribe(record);

        assert_eq!(*log.lock(), vec![Event::Next(2), Event::Completed]);
        assert!(handle.is_disposed());
        assert_eq!(hub.value().unwrap(), 2);
    }

    #[test]
    fn test_subscribe_after_error_gets_error_only() {
        let hub = BehaviorHub::new(1);
        hub.on_error(HubError::msg("feed lost"));

        let (log, record) = recorder();
        hub.subscribe(record);

        assert_eq!(*log.lock(), vec![Event::Error(HubError::msg("feed lost"))]);
    }

    #[test]
    fn test_value_after_error() {
        let hub = BehaviorHub::new(1);
        hub.on_error(HubError::msg("feed lost"));

        match hub.value() {
            Err(ValueError::Terminated(err)) => assert_eq!(err.to_string(), "feed lost"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_value_after_dispose() {
        let hub = BehaviorHub::new(1);
        hub.dispose();

        assert!(matches!(hub.value(), Err(ValueError::Disposed)));

        let (log, record) = recorder();
        hub.subscribe(record);
        assert_eq!(*log.lock(), vec![Event::Error(HubError::Disposed)]);
    }

    #[test]
    fn test_next_ignored_after_completion() {
        let hub = BehaviorHub::new(1);
        hub.on_completed();
        hub.on_next(5);

        assert_eq!(hub.value().unwrap(), 1);
    }
}
