//! Hub error types
//!
//! Two families of errors exist:
//!
//! - [`HubError`] travels *inside* the event stream as the payload of
//!   [`Event::Error`](crate::Event::Error). It is either a domain error handed
//!   to the hub by the producer, or a structural error the hub synthesizes
//!   itself (currently only [`HubError::Disposed`]).
//! - [`ValueError`] is returned by [`BehaviorHub::value`](crate::BehaviorHub::value)
//!   when no current value can be produced.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

/// Shared, clonable domain error payload
pub type DynError = Arc<dyn StdError + Send + Sync + 'static>;

/// Error carried by a terminal [`Event::Error`](crate::Event::Error)
#[derive(Debug, Clone, Error)]
pub enum HubError {
    /// Error supplied by the producer, delivered verbatim
    #[error("{0}")]
    Domain(DynError),
    /// The hub was disposed before this subscriber arrived
    #[error("hub has been disposed")]
    Disposed,
}

impl HubError {
    /// Wrap any error as a domain error
    pub fn domain<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        HubError::Domain(Arc::new(err))
    }

    /// Build a domain error from a plain message
    pub fn msg(message: impl Into<String>) -> Self {
        HubError::Domain(Arc::new(Message(message.into())))
    }

    /// Whether this error was synthesized by the hub itself
    pub fn is_structural(&self) -> bool {
        matches!(self, HubError::Disposed)
    }

    /// Short stable label (snake_case) for logs
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::Domain(_) => "hub_domain_error",
            HubError::Disposed => "hub_disposed",
        }
    }
}

impl PartialEq for HubError {
    /// Domain errors are equal when they share a payload or render the same
    /// text. A domain error never equals a structural one.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HubError::Domain(a), HubError::Domain(b)) => {
                Arc::ptr_eq(a, b) || a.to_string() == b.to_string()
            }
            (HubError::Disposed, HubError::Disposed) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);

/// Error returned when a behavior hub cannot produce its current value
#[derive(Debug, Clone, Error)]
pub enum ValueError {
    /// The hub terminated with this error
    #[error("hub terminated with an error: {0}")]
    Terminated(HubError),
    /// The hub has been disposed
    #[error("hub has been disposed")]
    Disposed,
}
