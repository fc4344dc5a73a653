//! Bounded-replay hub
//!
//! Remembers the most recent values up to a [`Capacity`] and replays them,
//! oldest first, to every new subscriber before live values. After
//! termination the buffer is still replayed, followed by the terminal event.

use std::sync::Arc;

use crate::buffer::{Capacity, ReplayBuffer};
use crate::config::HubConfig;
use crate::event::{Event, Terminal};

use super::core::{HubCore, Policy};

pub(crate) struct ReplayPolicy<T> {
    capacity: Capacity,
    buffer: ReplayBuffer<T>,
}

impl<T: Clone + Send + 'static> Policy<T> for ReplayPolicy<T> {
    fn on_next(&mut self, value: T) -> Option<T> {
        self.buffer.push(value.clone());
        Some(value)
    }

    fn on_terminal(&mut self, terminal: &Terminal) -> Vec<Event<T>> {
        vec![terminal.to_event()]
    }

    fn history(&self, terminal: Option<&Terminal>) -> Vec<Event<T>> {
        let mut history = Vec::with_capacity(self.buffer.len() + 1);
        history.extend(self.buffer.to_vec().into_iter().map(Event::Next));
        history.extend(terminal.map(Terminal::to_event));
        history
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Hub that replays recent values to late subscribers
pub struct ReplayHub<T> {
    core: Arc<HubCore<T, ReplayPolicy<T>>>,
}

impl<T> ReplayHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(capacity: Capacity) -> Self {
        Self::with_config(capacity, HubConfig::default())
    }

    /// Replay at most `capacity` values
    pub fn bounded(capacity: usize) -> Self {
        Self::new(Capacity::Bounded(capacity))
    }

    /// Replay every value ever sent
    pub fn unbounded() -> Self {
        Self::new(Capacity::Unbounded)
    }

    pub fn with_config(capacity: Capacity, config: HubConfig) -> Self {
        let policy = ReplayPolicy {
            capacity,
            buffer: ReplayBuffer::with_capacity(capacity),
        };
        Self {
            core: HubCore::new(policy, config, "ReplayHub"),
        }
    }

    pub fn capacity(&self) -> Capacity {
        self.core.with_state(|state| state.policy.capacity)
    }

    /// Number of values a new subscriber would have replayed
    pub fn buffered_len(&self) -> usize {
        self.core.with_state(|state| state.policy.buffer.len())
    }

    /// Name used in log records
    pub fn name(&self) -> &str {
        self.core.name()
    }
}

delegate_hub!(ReplayHub);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubError;
    use crate::hub::Hub;
    use crate::test_util::recorder;

    #[test]
    fn test_replays_last_n_then_live() {
        let hub = ReplayHub::bounded(2);
        hub.on_next("a");
        hub.on_next("b");
        hub.on_next("c");

        let (log, record) = recorder();
        hub.subscribe(record);
        hub.on_next("d");

        assert_eq!(
            *log.lock(),
            vec![Event::Next("b"), Event::Next("c"), Event::Next("d")]
        );
        assert_eq!(hub.buffered_len(), 2);
    }

    #[test]
    fn test_replay_exactness_for_many_sizes() {
        for n in 1..6usize {
            let hub = ReplayHub::bounded(n);
            let k = n * 3 + 1;
            for v in 0..k {
                hub.on_next(v);
            }

            let (log, record) = recorder();
            hub.subscribe(record);

            let expected: Vec<Event<usize>> = (k - n..k).map(Event::Next).collect();
            assert_eq!(*log.lock(), expected, "capacity {n}");
        }
    }

    #[test]
    fn test_replay_after_completion() {
        let hub = ReplayHub::bounded(3);
        hub.on_next(1);
        hub.on_next(2);
        hub.on_completed();

        let (log, record) = recorder();
        let handle = hub.subscribe(record);

        assert_eq!(
            *log.lock(),
            vec![Event::Next(1), Event::Next(2), Event::Completed]
        );
        assert!(handle.is_disposed());
    }

    #[test]
    fn test_replay_after_error() {
        let hub = ReplayHub::unbounded();
        hub.on_next(1);
        hub.on_error(HubError::msg("gone"));

        let (log, record) = recorder();
        hub.subscribe(record);

        assert_eq!(
            *log.lock(),
            vec![Event::Next(1), Event::Error(HubError::msg("gone"))]
        );
    }

    #[test]
    fn test_unbounded_replays_everything() {
        let hub = ReplayHub::unbounded();
        for v in 0..100 {
            hub.on_next(v);
        }

        let (log, record) = recorder();
        hub.subscribe(record);

        assert_eq!(log.lock().len(), 100);
        assert_eq!(hub.capacity(), Capacity::Unbounded);
    }

    #[test]
    fn test_zero_capacity_behaves_like_publish() {
        let hub = ReplayHub::bounded(0);
        hub.on_next(1);

        let (log, record) = recorder();
        hub.subscribe(record);
        hub.on_next(2);

        assert_eq!(*log.lock(), vec![Event::Next(2)]);
    }

    #[test]
    fn test_dispose_clears_buffer() {
        let hub = ReplayHub::bounded(4);
        hub.on_next(1);
        hub.dispose();

        assert_eq!(hub.buffered_len(), 0);

        let (log, record) = recorder();
        hub.subscribe(record);
        assert_eq!(*log.lock(), vec![Event::Error(HubError::Disposed)]);
    }
}
