//! Click feedback flash
//!
//! A short-lived boolean pulse that lights on every click and clears itself
//! after [`timing::CLICK_FLASH_MS`]. Re-triggering before the clear restarts
//! the window, so rapid clicks keep it continuously lit. Its lifecycle is
//! independent of any machine phase.

use crate::context::{MachineCx, TimerSlot};
use crate::mood::timing;
use crate::scheduler::{FiredTimer, TimerToken};

/// The click flash for one widget
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickFlash {
    lit: bool,
    duration_ms: u64,
    clear: TimerSlot,
}

impl Default for ClickFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickFlash {
    pub fn new() -> Self {
        Self::with_duration(timing::CLICK_FLASH_MS)
    }

    pub fn with_duration(duration_ms: u64) -> Self {
        Self {
            lit: false,
            duration_ms,
            clear: TimerSlot::new(),
        }
    }

    /// Light the flash and (re)start the clear window
    pub fn trigger(&mut self, cx: &mut MachineCx<'_>) {
        self.lit = true;
        self.clear.once(cx, self.duration_ms, TimerToken::CLICK_FLASH);
    }

    /// Handle a fired timer. Returns true if it was this flash's clear.
    pub fn on_timer(&mut self, fired: &FiredTimer) -> bool {
        if fired.token != TimerToken::CLICK_FLASH || !self.clear.claim(fired) {
            return false;
        }
        self.lit = false;
        true
    }

    /// Drop the pending clear and go dark
    pub fn cancel(&mut self, cx: &mut MachineCx<'_>) {
        self.clear.cancel(cx);
        self.lit = false;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn is_pending(&self) -> bool {
        self.clear.is_pending()
    }
}
