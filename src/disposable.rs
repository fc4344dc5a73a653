//! Subscription cancellation handles

use std::fmt;
use std::sync::Weak;

use parking_lot::Mutex;

use crate::registry::SubscriptionKey;

/// Something a subscription can be removed from
pub(crate) trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, key: SubscriptionKey);
}

/// Handle returned by `subscribe`
///
/// Holds only a weak reference to the hub, so an outstanding handle never
/// keeps a hub alive. Dropping a `Disposable` does **not** cancel the
/// subscription; call [`dispose`](Disposable::dispose) for that.
pub struct Disposable {
    target: Mutex<Option<(Weak<dyn Unsubscribe>, SubscriptionKey)>>,
}

impl Disposable {
    pub(crate) fn new(hub: Weak<dyn Unsubscribe>, key: SubscriptionKey) -> Self {
        Self {
            target: Mutex::new(Some((hub, key))),
        }
    }

    /// A handle with nothing to cancel
    ///
    /// Returned when the subscriber was never registered (the hub had already
    /// terminated or been disposed).
    pub fn noop() -> Self {
        Self {
            target: Mutex::new(None),
        }
    }

    /// Cancel the subscription
    ///
    /// Idempotent. Does nothing if the hub is already gone.
    pub fn dispose(&self) {
        let target = self.target.lock().take();
        if let Some((hub, key)) = target {
            if let Some(hub) = hub.upgrade() {
                hub.unsubscribe(key);
            }
        }
    }

    /// Check if there is nothing left to cancel
    pub fn is_disposed(&self) -> bool {
        self.target.lock().is_none()
    }

    /// Key of the registered subscriber, if still attached
    pub fn key(&self) -> Option<SubscriptionKey> {
        self.target.lock().as_ref().map(|(_, key)| *key)
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("key", &self.key())
            .finish()
    }
}

impl Default for Disposable {
    fn default() -> Self {
        Self::noop()
    }
}
