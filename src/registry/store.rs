//! Subscriber arena
//!
//! Subscribers live in a slot vector. A [`SubscriptionKey`] names a slot plus
//! the generation the slot had when the subscriber was inserted, so a key that
//! outlives its subscriber can never remove whoever reuses the slot later.

use std::fmt;
use std::sync::Arc;

use crate::event::Event;

/// Callback invoked once per delivered event
pub type Subscriber<T> = Arc<dyn Fn(&Event<T>) + Send + Sync + 'static>;

/// Opaque identifier of a registered subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionKey {
    index: u32,
    generation: u32,
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

struct Slot<T> {
    generation: u32,
    subscriber: Option<Subscriber<T>>,
}

/// Keyed container of subscriber callbacks
///
/// Insert and remove are O(1). [`snapshot`](Registry::snapshot) copies the
/// live callbacks in slot order, so a dispatch never observes later changes.
pub(crate) struct Registry<T> {
    slots: Vec<Slot<T>>,
    /// Indices of empty slots, reused LIFO
    free: Vec<u32>,
    len: usize,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn insert(&mut self, subscriber: Subscriber<T>) -> SubscriptionKey {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.subscriber = Some(subscriber);
            return SubscriptionKey {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            subscriber: Some(subscriber),
        });
        SubscriptionKey {
            index,
            generation: 0,
        }
    }

    /// Remove the subscriber behind `key`
    ///
    /// Unknown or stale keys are ignored. Returns true if a subscriber was removed.
    pub(crate) fn remove(&mut self, key: SubscriptionKey) -> bool {
        let Some(slot) = self.slots.get_mut(key.index as usize) else {
            return false;
        };
        if slot.generation != key.generation || slot.subscriber.is_none() {
            return false;
        }

        slot.subscriber = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);
        self.len -= 1;
        true
    }

    /// Copy the live subscribers in slot order
    pub(crate) fn snapshot(&self) -> Vec<Subscriber<T>> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.slots.iter().filter_map(|slot| slot.subscriber.clone()));
        out
    }

    /// Drop every subscriber, invalidating all outstanding keys
    pub(crate) fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.subscriber.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index as u32);
        }
        // Reuse low slots first
        self.free.reverse();
        self.len = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
