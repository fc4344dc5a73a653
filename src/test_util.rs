//! Helpers shared by unit tests

use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::Event;

pub(crate) type Log<T> = Arc<Mutex<Vec<Event<T>>>>;

/// A subscriber that appends every event it receives to the returned log
pub(crate) fn recorder<T: Clone + Send + 'static>(
) -> (Log<T>, impl Fn(&Event<T>) + Send + Sync + 'static) {
    let log: Log<T> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (log, move |event: &Event<T>| sink.lock().push(event.clone()))
}
