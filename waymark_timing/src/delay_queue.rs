// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot scheduled values.

use alloc::vec::Vec;
use smallvec::SmallVec;

/// A small queue of one-shot values, each due at a caller-chosen instant.
///
/// Used for deferred navigation ("scroll to this section in N
/// milliseconds"): schedule the navigation target, hand the host
/// [`DelayQueue::deadline`] to arrange a wake-up, and collect due values
/// with [`DelayQueue::fire_due`] when it arrives. Teardown cancels
/// everything so a stale registry is never acted on.
///
/// Entries due at the same pump come out in scheduling order.
#[derive(Clone, Debug)]
pub struct DelayQueue<T> {
    entries: Vec<(u64, T)>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of scheduled values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is scheduled.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `value` to come due at `due`.
    pub fn schedule(&mut self, due: u64, value: T) {
        self.entries.push((due, value));
    }

    /// Returns the earliest due instant, if anything is scheduled.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.entries.iter().map(|(due, _)| *due).min()
    }

    /// Removes and returns every value due at or before `now`, in
    /// scheduling order.
    pub fn fire_due(&mut self, now: u64) -> SmallVec<[T; 2]> {
        let mut fired = SmallVec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].0 <= now {
                fired.push(self.entries.remove(index).1);
            } else {
                index += 1;
            }
        }
        fired
    }

    /// Drops every scheduled value.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }
}
