// SPDX-License-Identifier: MPL-2.0
//! One-shot timers driven by the application tick.
//!
//! Components never sleep or spawn: they record a deadline with
//! [`Scheduler::schedule`], keep the returned [`TimerHandle`] so the timer can
//! be cancelled when a newer event supersedes it, and collect expired actions
//! from [`Scheduler::take_due`] whenever the host delivers a tick.
//!
//! Time is always passed in explicitly, which keeps every timed behavior
//! testable with synthetic `Instant`s.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Deadline offset used when `now + delay` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(u32::MAX as u64);

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<A> {
    deadline: Instant,
    action: A,
}

/// A set of pending one-shot timers, each carrying an action of type `A`.
#[derive(Debug)]
pub struct Scheduler<A> {
    pending: HashMap<TimerHandle, Pending<A>>,
    next_handle: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_handle: 0,
        }
    }
}

impl<A> Scheduler<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to fire once `delay` has elapsed after `now`.
    ///
    /// A delay too large for the platform clock is treated as "never" in
    /// practice: the timer stays pending until cancelled.
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) -> TimerHandle {
        let deadline = now
            .checked_add(delay)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert(
            handle,
            Pending {
                deadline,
                action,
            },
        );
        handle
    }

    /// Cancels a pending timer.
    ///
    /// Returns `true` if the timer was still pending. Cancelling a timer that
    /// already fired or was already cancelled is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Returns whether `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Removes and returns every action whose deadline is at or before `now`,
    /// ordered by deadline (ties in scheduling order).
    pub fn take_due(&mut self, now: Instant) -> Vec<A> {
        let mut due: Vec<(Instant, TimerHandle)> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(handle, pending)| (pending.deadline, *handle))
            .collect();
        due.sort_unstable();

        due.into_iter()
            .filter_map(|(_, handle)| self.pending.remove(&handle))
            .map(|pending| pending.action)
            .collect()
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending timer without firing it.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
