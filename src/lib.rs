//! # rx-hub
//!
//! Thread-safe multicast event hubs ("subjects"): one producer pushes a
//! sequence of [`Event`]s, any number of subscribers receive them, and late
//! subscribers get history according to the hub's replay policy.
//!
//! | Hub              | Constructed with | Late subscriber receives                   |
//! |------------------|------------------|--------------------------------------------|
//! | [`PublishHub`]   | nothing          | only the terminal event, if any            |
//! | [`BehaviorHub`]  | seed value       | current value, then live events            |
//! | [`ReplayHub`]    | [`Capacity`]     | last `n` values, then live or terminal     |
//! | [`AsyncHub`]     | nothing          | last value + `Completed` once completed    |
//!
//! ## Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use rx_hub::{Event, Hub, ReplayHub};
//!
//! let hub = ReplayHub::bounded(2);
//! hub.on_next(1u32);
//! hub.on_next(2);
//! hub.on_next(3);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let subscription = hub.subscribe(move |event: &Event<u32>| {
//!     sink.lock().unwrap().push(event.clone());
//! });
//!
//! hub.on_next(4);
//! subscription.dispose();
//! hub.on_next(5);
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     vec![Event::Next(2), Event::Next(3), Event::Next(4)]
//! );
//! ```
//!
//! ## Concurrency
//!
//! Hubs own no threads and hold no lock while a callback runs. Every method
//! may be called from any thread, and a subscriber callback may call back
//! into any hub, including the one delivering to it.
//!
//! `send` updates the hub immediately. Delivery is serialized per hub: if the
//! hub is already delivering (on another thread, or in an enclosing callback)
//! the new event is queued and that delivery picks it up, so each subscriber
//! observes events in the order they were committed.
//!
//! ## Errors
//!
//! `send` and `subscribe` never fail. Failures surface as data:
//! [`Event::Error`] carrying a producer [`HubError::Domain`] error, or the
//! structural [`HubError::Disposed`] delivered to a subscriber that arrives
//! after [`Hub::dispose`]. [`BehaviorHub::value`] returns a [`ValueError`].
//! A panic inside a callback propagates out of the `send` or `subscribe` call
//! that was delivering. The hub stays usable and events it had already
//! committed are delivered by the next call.

pub mod buffer;
pub mod channel;
pub mod config;
pub mod disposable;
pub mod error;
pub mod event;
pub mod hub;
pub mod registry;
pub mod stats;

mod terminal;
#[cfg(test)]
mod test_util;

pub use buffer::Capacity;
pub use channel::{subscribe_channel, HubReceiver};
pub use config::HubConfig;
pub use disposable::Disposable;
pub use error::{DynError, HubError, ValueError};
pub use event::Event;
pub use hub::{AsyncHub, BehaviorHub, Hub, PublishHub, ReplayHub};
pub use registry::{Subscriber, SubscriptionKey};
pub use stats::{HubMetrics, HubMetricsSnapshot};
