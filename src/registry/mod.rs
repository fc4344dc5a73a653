//! Subscription registry and event dispatch
//!
//! The registry owns every live subscriber callback of a hub. Dispatch never
//! walks the registry directly: the hub takes a [`snapshot`](store::Registry::snapshot)
//! under its state lock, releases the lock, and then delivers to the snapshot.
//!
//! ```text
//!         state lock held                      no lock held
//!   ┌──────────────────────────┐       ┌─────────────────────────────┐
//!   │ registry.snapshot()      │──────►│ dispatch(&snapshot, &event) │
//!   │   [cb0, cb1, cb2]        │       │   cb0(&event)               │
//!   └──────────────────────────┘       │   cb1(&event) ── may call   │
//!                                      │   cb2(&event)    back into  │
//!                                      └─────────────────  the hub ──┘
//! ```

mod dispatch;
mod store;

pub(crate) use dispatch::dispatch;
pub(crate) use store::Registry;
pub use store::{Subscriber, SubscriptionKey};
