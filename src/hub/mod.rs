//! Hub variants
//!
//! All variants share one send/subscribe skeleton ([`core`]) and differ only in
//! what they remember and re-emit:
//!
//! | Variant          | Live `Next` | Replay to late subscriber                 |
//! |------------------|-------------|-------------------------------------------|
//! | [`PublishHub`]   | yes         | terminal event only                       |
//! | [`BehaviorHub`]  | yes         | current value (not after an error)        |
//! | [`ReplayHub`]    | yes         | last `n` values, then terminal event      |
//! | [`AsyncHub`]     | no          | last value + `Completed`, or the error    |

/// Implements [`Hub`], `Clone` and `Debug` for a variant wrapping
/// `core: Arc<HubCore<T, Policy>>`.
macro_rules! delegate_hub {
    ($hub:ident) => {
        impl<T> $crate::hub::Hub<T> for $hub<T>
        where
            T: Clone + Send + Sync + 'static,
        {
            fn send(&self, event: $crate::event::Event<T>) {
                self.core.send(event);
            }

            fn subscribe_with(
                &self,
                subscriber: $crate::registry::Subscriber<T>,
            ) -> $crate::disposable::Disposable {
                self.core.subscribe(subscriber)
            }

            fn dispose(&self) {
                self.core.dispose();
            }

            fn is_disposed(&self) -> bool {
                self.core.with_state(|state| state.disposed)
            }

            fn is_terminated(&self) -> bool {
                self.core
                    .with_state(|state| state.termination.is_terminated())
            }

            fn subscriber_count(&self) -> usize {
                self.core.with_state(|state| state.registry.len())
            }
        }

        impl<T> Clone for $hub<T> {
            fn clone(&self) -> Self {
                Self {
                    core: std::sync::Arc::clone(&self.core),
                }
            }
        }

        impl<T> std::fmt::Debug for $hub<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(&*self.core, f)
            }
        }
    };
}

pub mod async_hub;
pub mod behavior;
pub(crate) mod core;
pub mod publish;
pub mod replay;

use std::sync::Arc;

use crate::disposable::Disposable;
use crate::error::HubError;
use crate::event::Event;
use crate::registry::Subscriber;

pub use async_hub::AsyncHub;
pub use behavior::BehaviorHub;
pub use publish::PublishHub;
pub use replay::ReplayHub;

/// Operations shared by every hub variant
///
/// All methods may be called from any thread, and from inside a subscriber
/// callback of the same hub.
pub trait Hub<T>: Send + Sync {
    /// Push an event to the hub
    ///
    /// The hub state reflects the event when this returns. Ignored once the
    /// hub has terminated or been disposed.
    fn send(&self, event: Event<T>);

    /// Register an already boxed subscriber
    fn subscribe_with(&self, subscriber: Subscriber<T>) -> Disposable;

    /// Tear the hub down; later subscribers receive [`HubError::Disposed`]
    fn dispose(&self);

    fn is_disposed(&self) -> bool;

    /// Check if a terminal event has been committed
    fn is_terminated(&self) -> bool;

    /// Number of registered subscribers
    fn subscriber_count(&self) -> usize;

    /// Register a subscriber callback
    ///
    /// Any history the variant replays is delivered before this returns,
    /// unless the hub is already delivering on another thread or in an
    /// enclosing callback. That delivery then replays it, ahead of any later
    /// event.
    fn subscribe<F>(&self, callback: F) -> Disposable
    where
        F: Fn(&Event<T>) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_with(Arc::new(callback))
    }

    fn on_next(&self, value: T) {
        self.send(Event::Next(value));
    }

    fn on_completed(&self) {
        self.send(Event::Completed);
    }

    fn on_error(&self, err: HubError) {
        self.send(Event::Error(err));
    }

    fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }
}
