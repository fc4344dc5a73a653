//! Immediate-only hub
//!
//! Values reach the subscribers registered at the moment they are sent and are
//! then forgotten. A subscriber arriving after termination receives only the
//! terminal event.

use std::sync::Arc;

use crate::config::HubConfig;
use crate::event::{Event, Terminal};

use super::core::{HubCore, Policy};

pub(crate) struct PublishPolicy;

impl<T: Send + 'static> Policy<T> for PublishPolicy {
    fn on_next(&mut self, value: T) -> Option<T> {
        Some(value)
    }

    fn on_terminal(&mut self, terminal: &Terminal) -> Vec<Event<T>> {
        vec![terminal.to_event()]
    }

    fn history(&self, terminal: Option<&Terminal>) -> Vec<Event<T>> {
        terminal.map(Terminal::to_event).into_iter().collect()
    }

    fn clear(&mut self) {}
}

/// Hub that broadcasts each value to current subscribers only
pub struct PublishHub<T> {
    core: Arc<HubCore<T, PublishPolicy>>,
}

impl<T> PublishHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    pub fn with_config(config: HubConfig) -> Self {
        Self {
            core: HubCore::new(PublishPolicy, config, "PublishHub"),
        }
    }

    /// Name used in log records
    pub fn name(&self) -> &str {
        self.core.name()
    }
}

impl<T> Default for PublishHub<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

delegate_hub!(PublishHub);
