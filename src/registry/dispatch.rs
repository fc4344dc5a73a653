//! Event dispatcher

use crate::event::Event;

use super::store::Subscriber;

/// Deliver `event` to every subscriber in `snapshot`, in order, on this thread.
///
/// Panics raised by a subscriber are not caught; the remaining subscribers of
/// the snapshot are then skipped.
pub(crate) fn dispatch<T>(snapshot: &[Subscriber<T>], event: &Event<T>) {
    for subscriber in snapshot {
        subscriber(event);
    }
}
