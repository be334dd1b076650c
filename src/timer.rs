//! Repeating-timer seam and a deterministic virtual-clock implementation.
//!
//! Carousels never own a thread or an event loop. They ask a [`Timers`]
//! implementation for a repeating timer and get back a [`TimerId`]; when the
//! host's timer fires it calls the controller's `on_timer(id)`. A controller
//! only reacts to the id it currently holds, so a cancelled timer that still
//! delivers a late tick cannot mutate state.
//!
//! [`ManualTimers`] keeps its own millisecond clock that only moves when the
//! caller advances it. Tests and the `simulate` command use it to run
//! autoplay scenarios without sleeping.

use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle for a scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Wrap a host timer handle (e.g. the value `setInterval` returned).
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Host-provided repeating timers.
pub trait Timers {
    /// Schedule a timer firing every `interval_ms` until cancelled.
    fn start_repeating(&mut self, interval_ms: u64) -> TimerId;

    /// Cancel a timer. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Schedule {
    interval_ms: u64,
    due_ms: u64,
}

/// Virtual clock driving repeating timers on demand.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now_ms: u64,
    next_id: u64,
    schedules: BTreeMap<TimerId, Schedule>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers that have not been cancelled.
    pub fn active_count(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.schedules.contains_key(&id)
    }

    /// Fire the earliest timer due at or before `until_ms`.
    ///
    /// Moves the clock to that timer's due time and reschedules it one
    /// interval later. Returns `None` once nothing is due; the clock is then
    /// left where the last firing put it, see [`ManualTimers::settle_at`].
    /// Ties fire in the order the timers were started. A timer whose next due
    /// time would pass `u64::MAX` is retired after this firing.
    pub fn fire_next(&mut self, until_ms: u64) -> Option<TimerId> {
        let (id, due_ms) = self
            .schedules
            .iter()
            .filter(|(_, s)| s.due_ms <= until_ms)
            .min_by_key(|(id, s)| (s.due_ms, **id))
            .map(|(id, s)| (*id, s.due_ms))?;

        self.now_ms = due_ms;
        let next_due = self
            .schedules
            .get(&id)
            .and_then(|s| due_ms.checked_add(s.interval_ms));
        match (next_due, self.schedules.get_mut(&id)) {
            (Some(next), Some(schedule)) => schedule.due_ms = next,
            _ => {
                self.schedules.remove(&id);
            }
        }
        Some(id)
    }

    /// Move the clock forward to `until_ms` without firing anything.
    pub fn settle_at(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Advance the clock by `ms`, returning every firing in chronological order.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let until = self.now_ms.saturating_add(ms);
        let mut fired = Vec::new();
        while let Some(id) = self.fire_next(until) {
            fired.push(id);
        }
        self.settle_at(until);
        fired
    }
}

impl Timers for ManualTimers {
    fn start_repeating(&mut self, interval_ms: u64) -> TimerId {
        let interval_ms = interval_ms.max(1);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.schedules.insert(
            id,
            Schedule {
                interval_ms,
                due_ms: self.now_ms.saturating_add(interval_ms),
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.schedules.remove(&id);
    }
}
