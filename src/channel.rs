//! Async bridge
//!
//! [`subscribe_channel`] registers a subscriber that forwards every delivered
//! event into an unbounded `tokio::sync::mpsc` channel, so async code can
//! `.await` hub events instead of handling them in a callback.
//!
//! ```text
//!   hub.send() ──► dispatch ──► forwarder ──► mpsc ──► HubReceiver::recv().await
//! ```
//!
//! The channel is unbounded: the hub has no back-pressure, and a producer must
//! never block on a slow consumer.

use tokio::sync::mpsc;

use crate::disposable::Disposable;
use crate::event::Event;
use crate::hub::Hub;

/// Receiving side of a channel subscription
///
/// Dropping the receiver cancels the subscription.
#[derive(Debug)]
pub struct HubReceiver<T> {
    rx: mpsc::UnboundedReceiver<Event<T>>,
    subscription: Disposable,
    finished: bool,
}

/// Subscribe to `hub` through a channel
///
/// History replayed by the hub is already queued in the channel when this
/// returns, unless the hub is mid-delivery on another thread.
pub fn subscribe_channel<T, H>(hub: &H) -> HubReceiver<T>
where
    T: Clone + Send + 'static,
    H: Hub<T>,
{
    let (tx, rx) = mpsc::unbounded_channel();

    let subscription = hub.subscribe(move |event: &Event<T>| {
        // Receiver gone: the subscription is being torn down
        let _ = tx.send(event.clone());
    });

    HubReceiver {
        rx,
        subscription,
        finished: false,
    }
}

impl<T> HubReceiver<T> {
    /// Receive the next event
    ///
    /// Returns `None` after the terminal event has been received, or once the
    /// hub has dropped this subscriber (unsubscribed, disposed or dropped) and
    /// every queued event has been read.
    pub async fn recv(&mut self) -> Option<Event<T>> {
        if self.finished {
            return None;
        }
        let event = self.rx.recv().await?;
        self.observe(&event);
        Some(event)
    }

    /// Receive an already queued event without waiting
    pub fn try_recv(&mut self) -> Option<Event<T>> {
        if self.finished {
            return None;
        }
        let event = self.rx.try_recv().ok()?;
        self.observe(&event);
        Some(event)
    }

    /// Cancel the subscription; events already queued can still be read
    pub fn detach(&self) {
        self.subscription.dispose();
    }

    /// Check if the terminal event has been received
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn observe(&mut self, event: &Event<T>) {
        if event.is_terminal() {
            self.finished = true;
            self.rx.close();
        }
    }
}

impl<T> Drop for HubReceiver<T> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}
