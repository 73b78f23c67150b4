//! Virtual-clock timer scheduler
//!
//! Owns every pending timer in the process. Time is a plain millisecond
//! counter that only moves when the host calls [`Scheduler::pop_due`] with a
//! later limit, which keeps every machine deterministic under test.
//!
//! Timers are keyed by generational [`TimerId`]s: once a timer is cancelled
//! or has fired, its id never matches a live timer again, so a stale handle
//! can't cancel or receive someone else's timer.
//!
//! Due timers come out in `(due time, schedule order)` order. A repeating
//! timer is rescheduled before it is handed out, so cancelling it from inside
//! its own callback stops it cleanly.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a mounted widget; timers are owned by one
    pub struct WidgetId;
    /// Handle to a scheduled timer
    pub struct TimerId;
}

/// Machine-chosen tag telling the owner which of its timers fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u32);

impl TimerToken {
    /// Reserved for the click flash clear
    pub const CLICK_FLASH: TimerToken = TimerToken(u32::MAX);
}

/// Whether a timer fires once or keeps going
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Every(u64),
}

struct TimerEntry {
    owner: WidgetId,
    token: TimerToken,
    due: u64,
    seq: u64,
    repeat: Repeat,
}

/// A timer that has come due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub owner: WidgetId,
    pub token: TimerToken,
    /// Clock value the timer fired at
    pub at: u64,
    /// Repeating timers stay scheduled after firing
    pub repeating: bool,
}

/// The process-wide timer queue
#[derive(Default)]
pub struct Scheduler {
    now: u64,
    next_seq: u64,
    timers: SlotMap<TimerId, TimerEntry>,
    by_owner: FxHashMap<WidgetId, SmallVec<[TimerId; 4]>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Fire once, `delay` after now
    pub fn schedule_once(&mut self, owner: WidgetId, delay: u64, token: TimerToken) -> TimerId {
        self.insert(owner, delay, token, Repeat::Once)
    }

    /// Fire every `period` (at least 1), first one `period` after now
    pub fn schedule_every(&mut self, owner: WidgetId, period: u64, token: TimerToken) -> TimerId {
        let period = period.max(1);
        self.insert(owner, period, token, Repeat::Every(period))
    }

    fn insert(
        &mut self,
        owner: WidgetId,
        delay: u64,
        token: TimerToken,
        repeat: Repeat,
    ) -> TimerId {
        let seq = self.bump_seq();
        let due = self.now.saturating_add(delay);
        let id = self.timers.insert(TimerEntry {
            owner,
            token,
            due,
            seq,
            repeat,
        });
        self.by_owner.entry(owner).or_default().push(id);
        tracing::trace!(?id, ?owner, ?token, due, ?repeat, "timer scheduled");
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(id) {
            Some(entry) => {
                self.unindex(entry.owner, id);
                tracing::trace!(?id, owner = ?entry.owner, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel every timer owned by `owner`, returning how many were pending
    pub fn cancel_owned_by(&mut self, owner: WidgetId) -> usize {
        let Some(ids) = self.by_owner.remove(&owner) else {
            return 0;
        };
        ids.into_iter()
            .filter(|id| self.timers.remove(*id).is_some())
            .count()
    }

    fn unindex(&mut self, owner: WidgetId, id: TimerId) {
        if let Some(ids) = self.by_owner.get_mut(&owner) {
            ids.retain(|t| *t != id);
            if ids.is_empty() {
                self.by_owner.remove(&owner);
            }
        }
    }

    /// Whether `id` is still scheduled
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Total pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pending timers owned by `owner`
    pub fn pending_for(&self, owner: WidgetId) -> usize {
        self.by_owner.get(&owner).map_or(0, |ids| ids.len())
    }

    /// Pending one-shot timers; repeating ones never drain on their own
    pub fn pending_once(&self) -> usize {
        self.timers
            .values()
            .filter(|t| t.repeat == Repeat::Once)
            .count()
    }

    /// Earliest due time among pending timers
    pub fn next_due(&self) -> Option<u64> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Take the next timer due at or before `limit`, moving the clock to it.
    ///
    /// Returns `None` once nothing else is due; the clock is then left where
    /// the last fired timer put it (see [`Scheduler::settle_at`]).
    pub fn pop_due(&mut self, limit: u64) -> Option<FiredTimer> {
        let (id, due) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= limit)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(id, t)| (id, t.due))?;

        self.now = self.now.max(due);
        let seq = self.bump_seq();
        let entry = self.timers.get_mut(id)?;
        let fired = FiredTimer {
            id,
            owner: entry.owner,
            token: entry.token,
            at: due,
            repeating: matches!(entry.repeat, Repeat::Every(_)),
        };

        match entry.repeat {
            Repeat::Every(period) => {
                entry.due = due.saturating_add(period);
                entry.seq = seq;
            }
            Repeat::Once => {
                self.timers.remove(id);
                self.unindex(fired.owner, id);
            }
        }

        tracing::trace!(?id, owner = ?fired.owner, token = ?fired.token, at = due, "timer fired");
        Some(fired)
    }

    /// Move the clock forward to `time` (never backwards)
    pub fn settle_at(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}
