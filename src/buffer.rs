//! Replay buffer for late-subscriber support
//!
//! When a new subscriber joins a replaying hub it first receives the values
//! the hub still remembers, oldest first, and only then live values. How many
//! values are remembered is decided once, at construction, by picking one of
//! the buffer strategies below.

use std::collections::VecDeque;

/// How many values a replay hub remembers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Keep at most this many of the most recent values
    Bounded(usize),
    /// Keep every value
    Unbounded,
}

/// Storage strategy for replayed values
#[derive(Debug, Clone)]
pub(crate) enum ReplayBuffer<T> {
    /// Remembers nothing
    None,
    /// Remembers the latest value only
    Single(Option<T>),
    /// Remembers up to `capacity` values, dropping the oldest
    Bounded { capacity: usize, items: VecDeque<T> },
    /// Remembers every value
    Unbounded(VecDeque<T>),
}

impl<T> ReplayBuffer<T> {
    /// Pick the strategy for a capacity
    pub(crate) fn with_capacity(capacity: Capacity) -> Self {
        match capacity {
            Capacity::Bounded(0) => ReplayBuffer::None,
            Capacity::Bounded(1) => ReplayBuffer::Single(None),
            Capacity::Bounded(capacity) => ReplayBuffer::Bounded {
                capacity,
                items: VecDeque::with_capacity(capacity.min(64)),
            },
            Capacity::Unbounded => ReplayBuffer::Unbounded(VecDeque::new()),
        }
    }

    /// Single-slot buffer already holding `value`
    pub(crate) fn seeded(value: T) -> Self {
        ReplayBuffer::Single(Some(value))
    }

    /// Append a value, trimming the oldest entries beyond capacity
    pub(crate) fn push(&mut self, value: T) {
        match self {
            ReplayBuffer::None => {}
            ReplayBuffer::Single(slot) => *slot = Some(value),
            ReplayBuffer::Bounded { capacity, items } => {
                items.push_back(value);
                while items.len() > *capacity {
                    items.pop_front();
                }
            }
            ReplayBuffer::Unbounded(items) => items.push_back(value),
        }
    }

    /// Most recently pushed value still held
    pub(crate) fn latest(&self) -> Option<&T> {
        match self {
            ReplayBuffer::None => None,
            ReplayBuffer::Single(slot) => slot.as_ref(),
            ReplayBuffer::Bounded { items, .. } | ReplayBuffer::Unbounded(items) => items.back(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            ReplayBuffer::None => 0,
            ReplayBuffer::Single(slot) => usize::from(slot.is_some()),
            ReplayBuffer::Bounded { items, .. } | ReplayBuffer::Unbounded(items) => items.len(),
        }
    }

    /// Drop every held value, keeping the strategy
    pub(crate) fn clear(&mut self) {
        match self {
            ReplayBuffer::None => {}
            ReplayBuffer::Single(slot) => *slot = None,
            ReplayBuffer::Bounded { items, .. } | ReplayBuffer::Unbounded(items) => items.clear(),
        }
    }
}

impl<T: Clone> ReplayBuffer<T> {
    /// Copy the held values, oldest first
    pub(crate) fn to_vec(&self) -> Vec<T> {
        match self {
            ReplayBuffer::None => Vec::new(),
            ReplayBuffer::Single(slot) => slot.iter().cloned().collect(),
            ReplayBuffer::Bounded { items, .. } | ReplayBuffer::Unbounded(items) => {
                items.iter().cloned().collect()
            }
        }
    }
}
