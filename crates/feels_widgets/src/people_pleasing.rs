//! People-pleasing button
//!
//! A confirmation ladder: with `S` stages (mood-scaled), the first `S` clicks
//! each show the next prompt and the `S + 1`-th click fires both callbacks
//! and starts over. No timers are involved.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback, ConfirmCallback};
use feels_core::mood::PleasingParams;
use feels_core::prelude::*;
use tracing::debug;

use crate::context::WidgetContext;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Ladder phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LadderPhase {
    Idle,
    /// Showing prompt `stage` (1-based) of `stages`, snapshotted on the
    /// ladder's first click
    Confirming {
        stage: usize,
        stages: &'static [&'static str],
    },
}

/// People-pleasing interaction state
#[derive(Debug)]
pub struct PleasingMachine {
    phase: LadderPhase,
    on_click: ClickCallback,
    on_confirm: ConfirmCallback,
}

impl PleasingMachine {
    pub fn new(on_click: ClickCallback, on_confirm: ConfirmCallback) -> Self {
        Self {
            phase: LadderPhase::Idle,
            on_click,
            on_confirm,
        }
    }

    pub fn phase(&self) -> LadderPhase {
        self.phase
    }

    /// Current stage, 0 when idle
    pub fn stage(&self) -> usize {
        match self.phase {
            LadderPhase::Idle => 0,
            LadderPhase::Confirming { stage, .. } => stage,
        }
    }
}

impl Machine for PleasingMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::PeoplePleasing
    }

    fn click(&mut self, cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        let (stage, stages) = match self.phase {
            LadderPhase::Idle => (0, PleasingParams::resolve(cx.mood()).stages),
            LadderPhase::Confirming { stage, stages } => (stage, stages),
        };

        if stage < stages.len() {
            self.phase = LadderPhase::Confirming {
                stage: stage + 1,
                stages,
            };
            debug!(
                owner = ?cx.owner(),
                stage = stage + 1,
                total = stages.len(),
                "people-pleasing: asking again"
            );
            return Ok(());
        }

        self.phase = LadderPhase::Idle;
        debug!(owner = ?cx.owner(), "people-pleasing: confirmed");
        self.on_click.call(event)?;
        self.on_confirm.call()
    }

    fn cancel_all(&mut self, _cx: &mut MachineCx<'_>) {
        self.phase = LadderPhase::Idle;
    }

    fn pending_timers(&self) -> usize {
        0
    }

    fn display(&self, content: &Content, _mood: MoodLevel) -> DisplayState {
        let mut state = DisplayState::new(WidgetKind::PeoplePleasing, content.clone());
        if let LadderPhase::Confirming { stage, stages } = self.phase {
            state.set_label(Content::text(stages[stage - 1]));
            state.visual = Visual::Confirming {
                stage,
                total: stages.len(),
            };
        }
        state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Create a people-pleasing button
pub fn people_pleasing() -> PleasingBuilder {
    PleasingBuilder {
        props: WidgetProps::default(),
        on_confirm: ConfirmCallback::none(),
    }
}

/// Builder for people-pleasing buttons
pub struct PleasingBuilder {
    props: WidgetProps,
    on_confirm: ConfirmCallback,
}

impl PleasingBuilder {
    /// Called with no arguments once the ladder is fully confirmed
    pub fn on_confirm<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.on_confirm = ConfirmCallback::new(callback);
        self
    }

    /// Fallible variant of [`PleasingBuilder::on_confirm`]
    pub fn try_on_confirm<F>(mut self, callback: F) -> Self
    where
        F: FnMut() -> CallbackResult + 'static,
    {
        self.on_confirm = ConfirmCallback::fallible(callback);
        self
    }
}

impl WidgetBuilder for PleasingBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = PleasingMachine::new(self.props.take_on_click(), self.on_confirm);
        cx.mount(machine, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counters {
        clicks: Rc<Cell<u32>>,
        confirms: Rc<Cell<u32>>,
    }

    fn mount_counted(cx: &mut WidgetContext) -> (WidgetId, Counters) {
        let clicks = Rc::new(Cell::new(0));
        let confirms = Rc::new(Cell::new(0));
        let (c, f) = (clicks.clone(), confirms.clone());
        let id = people_pleasing()
            .on_click(move |_| c.set(c.get() + 1))
            .on_confirm(move || f.set(f.get() + 1))
            .mount(cx);
        (id, Counters { clicks, confirms })
    }

    #[test]
    fn test_fires_on_stage_count_plus_one() {
        for (mood, stages) in [
            (MoodLevel::Subtle, 2),
            (MoodLevel::Normal, 4),
            (MoodLevel::Extreme, 6),
        ] {
            let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
            cx.set_mood(mood);
            let (id, counters) = mount_counted(&mut cx);

            for n in 1..=stages {
                cx.click(id, &ClickEvent::default()).unwrap();
                assert_eq!(counters.clicks.get(), 0, "{mood}: fired early at click {n}");
                let machine = cx.machine::<PleasingMachine>(id).unwrap();
                assert_eq!(machine.stage(), n);
            }

            cx.click(id, &ClickEvent::default()).unwrap();
            assert_eq!(counters.clicks.get(), 1);
            assert_eq!(counters.confirms.get(), 1);
            assert_eq!(cx.machine::<PleasingMachine>(id).unwrap().stage(), 0);
        }
    }

    #[test]
    fn test_prompt_and_progress_shown() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let (id, _) = mount_counted(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        cx.click(id, &ClickEvent::default()).unwrap();
        let state = cx.display(id).unwrap();
        assert_eq!(state.label, Content::text("Really sure?"));
        assert_eq!(state.visual, Visual::Confirming { stage: 2, total: 4 });
    }

    #[test]
    fn test_mood_change_mid_ladder_keeps_snapshot() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        cx.set_mood(MoodLevel::Extreme);
        let (id, counters) = mount_counted(&mut cx);

        for _ in 0..5 {
            cx.click(id, &ClickEvent::default()).unwrap();
        }
        cx.set_mood(MoodLevel::Subtle);
        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(counters.clicks.get(), 0);
        assert_eq!(
            cx.display(id).unwrap().label,
            Content::text("Last chance to back out...")
        );

        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(counters.clicks.get(), 1);

        // The next ladder follows the new mood
        for _ in 0..2 {
            cx.click(id, &ClickEvent::default()).unwrap();
        }
        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(counters.clicks.get(), 2);
    }

    #[test]
    fn test_click_failure_skips_confirm_but_resets() {
        let confirms = Rc::new(Cell::new(0));
        let f = confirms.clone();
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        cx.set_mood(MoodLevel::Subtle);
        let id = people_pleasing()
            .try_on_click(|_| anyhow::bail!("nope"))
            .on_confirm(move || f.set(f.get() + 1))
            .mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        cx.click(id, &ClickEvent::default()).unwrap();
        let err = cx.click(id, &ClickEvent::default()).unwrap_err();
        assert_eq!(err.to_string(), "nope");
        assert_eq!(confirms.get(), 0);
        assert_eq!(cx.machine::<PleasingMachine>(id).unwrap().stage(), 0);
    }

    #[test]
    fn test_full_ladder_returns_to_fresh_state() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        cx.set_mood(MoodLevel::Subtle);
        let (id, counters) = mount_counted(&mut cx);
        let fresh = cx.display(id).unwrap();

        for round in 1..=2 {
            for _ in 0..3 {
                cx.click(id, &ClickEvent::default()).unwrap();
            }
            cx.advance_until_quiet(10_000).unwrap();
            assert_eq!(counters.confirms.get(), round);
            assert_eq!(cx.display(id).unwrap(), fresh);
            assert_eq!(cx.pending_timers(id), 0);
        }
    }
}
