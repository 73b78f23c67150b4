//! Hover-driven rotation through a fixed list
//!
//! Shared by the widgets that cycle something (thoughts, design eras) while
//! the pointer rests on them: entering starts at index 0 with a repeating
//! timer, each tick advances modulo the list length, leaving stops it.

use feels_core::context::{MachineCx, TimerSlot};
use feels_core::scheduler::{FiredTimer, TimerToken};

const TICK: TimerToken = TimerToken(0);

/// Position in a rotation of `len` items
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rotation {
    index: usize,
    len: usize,
    ticker: TimerSlot,
}

impl Rotation {
    /// Start at index 0, advancing every `period_ms`
    pub fn start(&mut self, cx: &mut MachineCx<'_>, len: usize, period_ms: u64) {
        self.index = 0;
        self.len = len.max(1);
        self.ticker.every(cx, period_ms, TICK);
    }

    /// Stop advancing and forget the position
    pub fn stop(&mut self, cx: &mut MachineCx<'_>) {
        self.ticker.cancel(cx);
        self.index = 0;
        self.len = 0;
    }

    /// Advance if `fired` is this rotation's tick. Returns true if it was.
    pub fn tick(&mut self, fired: &FiredTimer) -> bool {
        if !self.ticker.claim(fired) {
            return false;
        }
        self.index = (self.index + 1) % self.len.max(1);
        true
    }

    /// Current index while running
    pub fn current(&self) -> Option<usize> {
        self.is_running().then_some(self.index)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_pending()
    }

    pub fn pending_timers(&self) -> usize {
        usize::from(self.ticker.is_pending())
    }
}
