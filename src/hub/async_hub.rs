//! Last-value-on-completion hub
//!
//! Intermediate values are never broadcast. On completion the hub emits the
//! last value it received (if any) followed by `Completed`, and replays that
//! same pair to anyone subscribing later. An error discards the pending value.

use std::sync::Arc;

use crate::buffer::{Capacity, ReplayBuffer};
use crate::config::HubConfig;
use crate::event::{Event, Terminal};

use super::core::{HubCore, Policy};

pub(crate) struct AsyncPolicy<T> {
    last: ReplayBuffer<T>,
}

impl<T: Clone> AsyncPolicy<T> {
    fn outcome(&self, terminal: &Terminal) -> Vec<Event<T>> {
        match terminal {
            Terminal::Completed => {
                let mut events: Vec<Event<T>> =
                    self.last.latest().cloned().map(Event::Next).into_iter().collect();
                events.push(Event::Completed);
                events
            }
            Terminal::Error(_) => vec![terminal.to_event()],
        }
    }
}

impl<T: Clone + Send + 'static> Policy<T> for AsyncPolicy<T> {
    fn on_next(&mut self, value: T) -> Option<T> {
        self.last.push(value);
        None
    }

    fn on_terminal(&mut self, terminal: &Terminal) -> Vec<Event<T>> {
        if terminal.is_error() {
            self.last.clear();
        }
        self.outcome(terminal)
    }

    fn history(&self, terminal: Option<&Terminal>) -> Vec<Event<T>> {
        match terminal {
            Some(terminal) => self.outcome(terminal),
            None => Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.last.clear();
    }
}

/// Hub that emits only its final value, on completion
pub struct AsyncHub<T> {
    core: Arc<HubCore<T, AsyncPolicy<T>>>,
}

impl<T> AsyncHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    pub fn with_config(config: HubConfig) -> Self {
        let policy = AsyncPolicy {
            last: ReplayBuffer::with_capacity(Capacity::Bounded(1)),
        };
        Self {
            core: HubCore::new(policy, config, "AsyncHub"),
        }
    }

    /// Name used in log records
    pub fn name(&self) -> &str {
        self.core.name()
    }
}

impl<T> Default for AsyncHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

delegate_hub!(AsyncHub);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubError;
    use crate::hub::Hub;
    use crate::test_util::recorder;

    #[test]
    fn test_emits_only_last_value_on_completion() {
        let hub = AsyncHub::new();
        let (early, record_early) = recorder();
        hub.subscribe(record_early);

        hub.on_next(10);
        hub.on_next(20);
        assert!(early.lock().is_empty());

        hub.on_completed();
        assert_eq!(*early.lock(), vec![Event::Next(20), Event::Completed]);

        let (late, record_late) = recorder();
        hub.subscribe(record_late);
        assert_eq!(*late.lock(), vec![Event::Next(20), Event::Completed]);
    }

    #[test]
    fn test_completion_without_value() {
        let hub = AsyncHub::<u8>::new();
        let (early, record_early) = recorder();
        hub.subscribe(record_early);

        hub.on_completed();

        let (late, record_late) = recorder();
        hub.subscribe(record_late);

        assert_eq!(*early.lock(), vec![Event::Completed]);
        assert_eq!(*late.lock(), vec![Event::Completed]);
    }

    #[test]
    fn test_error_discards_value() {
        let hub = AsyncHub::new();
        let (early, record_early) = recorder();
        hub.subscribe(record_early);

        hub.on_next(1);
        hub.on_error(HubError::msg("failed"));

        let (late, record_late) = recorder();
        hub.subscribe(record_late);

        let expected = vec![Event::Error(HubError::msg("failed"))];
        assert_eq!(*early.lock(), expected);
        assert_eq!(*late.lock(), expected);
    }

    #[test]
    fn test_single_value_law() {
        for sends in 0..5 {
            let hub = AsyncHub::new();
            let (log, record) = recorder();
            hub.subscribe(record);

            for v in 0..sends {
                hub.on_next(v);
            }
            hub.on_completed();
            hub.on_next(99);
            hub.on_completed();

            let nexts = log.lock().iter().filter(|e| !e.is_terminal()).count();
            assert_eq!(nexts, usize::from(sends > 0));
            assert_eq!(log.lock().last(), Some(&Event::Completed));
        }
    }

    #[test]
    fn test_live_subscriber_gets_no_replay() {
        let hub = AsyncHub::new();
        hub.on_next(1);

        let (log, record) = recorder();
        let handle = hub.subscribe(record);

        assert!(log.lock().is_empty());
        assert!(!handle.is_disposed());
        assert_eq!(hub.subscriber_count(), 1);
    }
}
