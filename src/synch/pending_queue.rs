//! FIFO of origins that have vehicles waiting to enter
//!
//! Each direction can be pending at most once, so the ring never needs more
//! than one slot per direction.

use super::types::{Direction, DIRECTION_COUNT};

/// Bounded, deduplicated queue of waiting origins in first-arrival order
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    slots: [Option<Direction>; DIRECTION_COUNT],
    /// Slot holding the oldest pending origin
    head: usize,
    len: usize,
    /// Membership per direction, kept in step with `slots`
    queued: [bool; DIRECTION_COUNT],
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, origin: Direction) -> bool {
        self.queued[origin.index()]
    }

    /// Append `origin` unless it is already pending.
    /// Returns true if the origin was newly queued.
    pub fn push(&mut self, origin: Direction) -> bool {
        if self.contains(origin) {
            return false;
        }

        // Distinct origins never exceed the slot count
        let tail = (self.head + self.len) % DIRECTION_COUNT;
        self.slots[tail] = Some(origin);
        self.queued[origin.index()] = true;
        self.len += 1;
        true
    }

    /// Oldest pending origin, without removing it
    pub fn peek(&self) -> Option<Direction> {
        self.slots[self.head]
    }

    /// Remove and return the oldest pending origin
    pub fn pop(&mut self) -> Option<Direction> {
        let origin = self.slots[self.head].take()?;
        self.queued[origin.index()] = false;
        self.head = (self.head + 1) % DIRECTION_COUNT;
        self.len -= 1;
        Some(origin)
    }

    /// Pending origins from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        (0..self.len).filter_map(move |offset| self.slots[(self.head + offset) % DIRECTION_COUNT])
    }
}
