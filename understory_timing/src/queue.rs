// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::time::Duration;

use hashbrown::HashSet;

/// Identifies a scheduled timer within one [`TimerQueue`].
///
/// Ids are allocated in increasing order and never reused by the same queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer that has come due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer<T> {
    /// Id returned when the timer was scheduled.
    pub id: TimerId,
    /// Deadline in host milliseconds.
    pub deadline: u64,
    /// Caller data attached at scheduling time.
    pub payload: T,
}

#[derive(Debug)]
struct Entry<T> {
    deadline: u64,
    id: TimerId,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.id == other.id
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so `BinaryHeap` pops the earliest deadline, then the lowest id.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// A min-deadline queue of pending timers.
///
/// Cancellation is lazy: cancelled entries stay in the heap until they reach
/// the front, but they are never returned and do not count towards
/// [`len`](Self::len).
#[derive(Debug)]
pub struct TimerQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    live: HashSet<TimerId>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashSet::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to fire at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Entry {
            deadline,
            id,
            payload,
        });
        self.live.insert(id);
        id
    }

    /// Schedules `payload` to fire `delay` after `now`.
    ///
    /// The deadline saturates at `u64::MAX`.
    pub fn schedule_after(&mut self, now: u64, delay: Duration, payload: T) -> TimerId {
        self.schedule(now.saturating_add(duration_to_millis(delay)), payload)
    }

    /// Cancels a pending timer.
    ///
    /// Returns `false` if the timer already fired or was already cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id)
    }

    /// Returns `true` if `id` is still pending.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.live.contains(&id)
    }

    /// Returns the earliest pending deadline, if any.
    ///
    /// Takes `&mut self` to discard cancelled entries at the front of the heap.
    pub fn next_deadline(&mut self) -> Option<u64> {
        self.purge_cancelled_front();
        self.heap.peek().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<Timer<T>> {
        self.purge_cancelled_front();
        if self.heap.peek()?.deadline > now {
            return None;
        }
        let entry = self.heap.pop()?;
        self.live.remove(&entry.id);
        Some(Timer {
            id: entry.id,
            deadline: entry.deadline,
            payload: entry.payload,
        })
    }

    /// Removes and returns every timer due at or before `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> Vec<Timer<T>> {
        let mut due = Vec::new();
        while let Some(timer) = self.pop_due(now) {
            due.push(timer);
        }
        due
    }

    /// Number of pending (not fired, not cancelled) timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drops every pending timer. Ids are not reused afterwards.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    fn purge_cancelled_front(&mut self) {
        while let Some(front) = self.heap.peek() {
            if self.live.contains(&front.id) {
                break;
            }
            self.heap.pop();
        }
    }
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
