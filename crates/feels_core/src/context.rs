//! Machine context
//!
//! [`MachineCx`] is everything a machine may touch while handling one event
//! or timer: the scheduler (scoped to the machine's own widget id), the
//! random source, and the mood snapshot for this dispatch. It is built fresh
//! for every dispatch, so a machine can't hold on to any of it.

use crate::mood::MoodLevel;
use crate::random::RandomSource;
use crate::scheduler::{FiredTimer, Scheduler, TimerId, TimerToken, WidgetId};

/// Per-dispatch access to the engine for one widget's machine
pub struct MachineCx<'a> {
    scheduler: &'a mut Scheduler,
    random: &'a mut dyn RandomSource,
    owner: WidgetId,
    mood: MoodLevel,
}

impl<'a> MachineCx<'a> {
    pub fn new(
        scheduler: &'a mut Scheduler,
        random: &'a mut dyn RandomSource,
        owner: WidgetId,
        mood: MoodLevel,
    ) -> Self {
        Self {
            scheduler,
            random,
            owner,
            mood,
        }
    }

    /// The widget this dispatch belongs to
    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    /// Mood in effect for this dispatch
    pub fn mood(&self) -> MoodLevel {
        self.mood
    }

    /// Current clock value
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// A fresh uniform draw in `[0, 1)`
    pub fn random(&mut self) -> f64 {
        self.random.next()
    }

    pub fn schedule_once(&mut self, delay: u64, token: TimerToken) -> TimerId {
        self.scheduler.schedule_once(self.owner, delay, token)
    }

    pub fn schedule_every(&mut self, period: u64, token: TimerToken) -> TimerId {
        self.scheduler.schedule_every(self.owner, period, token)
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.scheduler.cancel(id)
    }
}

/// An owned handle to at most one pending timer.
///
/// Starting a new timer through the slot always cancels the previous one
/// first, so a machine holding one slot per concern can never stack
/// transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    id: Option<TimerId>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is pending with a one-shot timer
    pub fn once(&mut self, cx: &mut MachineCx<'_>, delay: u64, token: TimerToken) {
        self.cancel(cx);
        self.id = Some(cx.schedule_once(delay, token));
    }

    /// Replace whatever is pending with a repeating timer
    pub fn every(&mut self, cx: &mut MachineCx<'_>, period: u64, token: TimerToken) {
        self.cancel(cx);
        self.id = Some(cx.schedule_every(period, token));
    }

    /// Cancel the pending timer, if any
    pub fn cancel(&mut self, cx: &mut MachineCx<'_>) -> bool {
        match self.id.take() {
            Some(id) => cx.cancel(id),
            None => false,
        }
    }

    /// Claim a fired timer. Returns true if it belongs to this slot; a
    /// one-shot timer empties the slot, a repeating one keeps it.
    pub fn claim(&mut self, fired: &FiredTimer) -> bool {
        if self.id != Some(fired.id) {
            return false;
        }
        if !fired.repeating {
            self.id = None;
        }
        true
    }

    pub fn is_pending(&self) -> bool {
        self.id.is_some()
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use slotmap::SlotMap;

    fn owner() -> WidgetId {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn test_slot_replaces_pending_timer() {
        let mut scheduler = Scheduler::new();
        let mut rng = SequenceRandom::new([0.5]);
        let w = owner();
        let mut slot = TimerSlot::new();

        {
            let mut cx = MachineCx::new(&mut scheduler, &mut rng, w, MoodLevel::Normal);
            slot.once(&mut cx, 100, TimerToken(1));
            slot.once(&mut cx, 100, TimerToken(2));
            assert_eq!(cx.random(), 0.5);
        }

        assert_eq!(scheduler.pending_for(w), 1);
        let fired = scheduler.pop_due(100).unwrap();
        assert_eq!(fired.token, TimerToken(2));
        assert!(slot.claim(&fired));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_slot_ignores_foreign_timer() {
        let mut scheduler = Scheduler::new();
        let mut rng = SequenceRandom::new([]);
        let w = owner();
        let mut slot = TimerSlot::new();
        let other = scheduler.schedule_once(w, 5, TimerToken(9));

        let mut cx = MachineCx::new(&mut scheduler, &mut rng, w, MoodLevel::Normal);
        slot.every(&mut cx, 10, TimerToken(1));
        drop(cx);

        let fired = scheduler.pop_due(5).unwrap();
        assert_eq!(fired.id, other);
        assert!(!slot.claim(&fired));
        assert!(slot.is_pending());
    }

    #[test]
    fn test_repeating_claim_keeps_slot() {
        let mut scheduler = Scheduler::new();
        let mut rng = SequenceRandom::new([]);
        let w = owner();
        let mut slot = TimerSlot::new();

        let mut cx = MachineCx::new(&mut scheduler, &mut rng, w, MoodLevel::Normal);
        slot.every(&mut cx, 10, TimerToken(1));
        drop(cx);

        let fired = scheduler.pop_due(10).unwrap();
        assert!(slot.claim(&fired));
        assert!(slot.is_pending());
    }
}
