//! Dissociating button
//!
//! A click starts a long, randomized stare. When it ends the button either
//! does what was asked or forgets, shows that it forgot, and drifts back to
//! idle. While it is busy every click is swallowed.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::{timing, DissociatingParams};
use feels_core::prelude::*;
use tracing::debug;

use crate::context::WidgetContext;
use crate::widget::{Content, Cursor, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Label shown after forgetting
pub const FORGOT_LABEL: &str = "...what was I doing?";
/// Tooltip shown while loading
pub const LOADING_TOOLTIP: &str = "...where am I?";

const SETTLE: TimerToken = TimerToken(0);
const RECOVER: TimerToken = TimerToken(1);

/// Dissociating configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DissociatingConfig {
    /// Probability of forgetting; ignored at Extreme mood
    pub forget_chance: f64,
}

impl Default for DissociatingConfig {
    fn default() -> Self {
        Self {
            forget_chance: timing::DEFAULT_FORGET_CHANCE,
        }
    }
}

/// Dissociating phases
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DissociatePhase {
    Idle,
    /// Waiting out the delay; the click is held for the callback and the
    /// outcome is already decided
    Loading { event: ClickEvent, will_forget: bool },
    Forgot,
}

/// Dissociating interaction state
#[derive(Debug)]
pub struct DissociatingMachine {
    config: DissociatingConfig,
    phase: DissociatePhase,
    /// The single phase-advance timer
    advance: TimerSlot,
    on_click: ClickCallback,
}

impl DissociatingMachine {
    pub fn new(config: DissociatingConfig, on_click: ClickCallback) -> Self {
        Self {
            config,
            phase: DissociatePhase::Idle,
            advance: TimerSlot::new(),
            on_click,
        }
    }

    pub fn phase(&self) -> DissociatePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == DissociatePhase::Idle
    }
}

impl Machine for DissociatingMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Dissociating
    }

    fn accepts_click(&self) -> bool {
        self.is_idle()
    }

    fn click(&mut self, cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        if !self.is_idle() {
            return Ok(());
        }
        let params = DissociatingParams::resolve(cx.mood());
        let delay = params.delay_ms(cx.random());
        let forget_chance = params.forget_chance(self.config.forget_chance);
        let will_forget = cx.random() < forget_chance;

        self.phase = DissociatePhase::Loading {
            event: *event,
            will_forget,
        };
        self.advance.once(cx, delay, SETTLE);
        debug!(owner = ?cx.owner(), delay, will_forget, "dissociating: drifting off");
        Ok(())
    }

    fn timer_fired(&mut self, cx: &mut MachineCx<'_>, fired: &FiredTimer) -> CallbackResult {
        if !self.advance.claim(fired) {
            return Ok(());
        }
        match (fired.token, self.phase) {
            (SETTLE, DissociatePhase::Loading { event, will_forget }) => {
                if will_forget {
                    self.phase = DissociatePhase::Forgot;
                    self.advance.once(cx, timing::FORGOT_RESET_MS, RECOVER);
                    debug!(owner = ?cx.owner(), "dissociating: forgot");
                    Ok(())
                } else {
                    self.phase = DissociatePhase::Idle;
                    debug!(owner = ?cx.owner(), "dissociating: came back");
                    self.on_click.call(&event)
                }
            }
            (RECOVER, DissociatePhase::Forgot) => {
                self.phase = DissociatePhase::Idle;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn cancel_all(&mut self, cx: &mut MachineCx<'_>) {
        self.advance.cancel(cx);
        self.phase = DissociatePhase::Idle;
    }

    fn pending_timers(&self) -> usize {
        usize::from(self.advance.is_pending())
    }

    fn display(&self, content: &Content, _mood: MoodLevel) -> DisplayState {
        let mut state = DisplayState::new(WidgetKind::Dissociating, content.clone());
        match self.phase {
            DissociatePhase::Idle => {}
            DissociatePhase::Loading { .. } => {
                state.tooltip = Some(LOADING_TOOLTIP.to_string());
                state.visual = Visual::Dimmed;
                state.busy = true;
                state.disabled = true;
                state.cursor = Cursor::Wait;
            }
            DissociatePhase::Forgot => {
                state.set_label(Content::text(FORGOT_LABEL));
                state.disabled = true;
            }
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

/// Create a dissociating button
pub fn dissociating() -> DissociatingBuilder {
    DissociatingBuilder {
        props: WidgetProps::default(),
        config: DissociatingConfig::default(),
    }
}

/// Builder for dissociating buttons
pub struct DissociatingBuilder {
    props: WidgetProps,
    config: DissociatingConfig,
}

impl DissociatingBuilder {
    /// Probability of forgetting. Not validated.
    pub fn forget_chance(mut self, chance: f64) -> Self {
        self.config.forget_chance = chance;
        self
    }
}

impl WidgetBuilder for DissociatingBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = DissociatingMachine::new(self.config, self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn mount_counted(cx: &mut WidgetContext, chance: f64) -> (WidgetId, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let sink = calls.clone();
        let id = dissociating()
            .forget_chance(chance)
            .on_click(move |_| sink.set(sink.get() + 1))
            .mount(cx);
        (id, calls)
    }

    fn phase(cx: &WidgetContext, id: WidgetId) -> DissociatePhase {
        cx.machine::<DissociatingMachine>(id).unwrap().phase()
    }

    #[test]
    fn test_completes_after_delay() {
        // Delay draw 0.5 -> 4000ms; forget draw 0.9 >= 0.3 -> completes
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.5, 0.9]));
        let (id, calls) = mount_counted(&mut cx, 0.3);

        cx.click(id, &ClickEvent::at(4.0, 2.0)).unwrap();
        assert!(matches!(phase(&cx, id), DissociatePhase::Loading { .. }));
        let state = cx.display(id).unwrap();
        assert!(state.busy && state.disabled);
        assert_eq!(state.tooltip.as_deref(), Some(LOADING_TOOLTIP));

        cx.advance(3999).unwrap();
        assert_eq!(calls.get(), 0);
        cx.advance(1).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(phase(&cx, id), DissociatePhase::Idle);
    }

    #[test]
    fn test_forget_branch_resets_after_two_seconds() {
        // Delay draw 0.0 at Subtle -> 1500ms; forget draw 0.1 < 0.3
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.0, 0.1]));
        cx.set_mood(MoodLevel::Subtle);
        let (id, calls) = mount_counted(&mut cx, 0.3);

        cx.click(id, &ClickEvent::default()).unwrap();
        cx.advance(1500).unwrap();
        assert_eq!(phase(&cx, id), DissociatePhase::Forgot);
        assert_eq!(cx.display(id).unwrap().label, Content::text(FORGOT_LABEL));

        cx.advance(2000).unwrap();
        assert_eq!(phase(&cx, id), DissociatePhase::Idle);
        assert_eq!(calls.get(), 0);
        assert_eq!(cx.pending_timers(id), 0);
    }

    #[test]
    fn test_click_while_loading_has_no_effect() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.5, 0.9]));
        let (id, calls) = mount_counted(&mut cx, 0.0);

        cx.click(id, &ClickEvent::default()).unwrap();
        cx.advance(300).unwrap();
        let before = phase(&cx, id);
        let timers = cx.pending_timers(id);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(phase(&cx, id), before);
        assert_eq!(cx.pending_timers(id), timers);
        assert!(!cx.is_flashed(id));

        cx.advance_until_quiet(10_000).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_delay_bounds_per_mood() {
        for (mood, low, high) in [
            (MoodLevel::Subtle, 1500, 2500),
            (MoodLevel::Normal, 3000, 5000),
            (MoodLevel::Extreme, 4500, 7500),
        ] {
            for unit in [0.0, 0.999_999] {
                let mut cx = WidgetContext::with_random(SequenceRandom::new([unit, 0.99]));
                cx.set_mood(mood);
                let (id, calls) = mount_counted(&mut cx, 0.0);
                cx.click(id, &ClickEvent::default()).unwrap();
                cx.advance(low - 1).unwrap();
                assert_eq!(calls.get(), 0);
                cx.advance(high - low + 1).unwrap();
                assert_eq!(calls.get(), 1, "{mood} unit {unit}");
            }
        }
    }

    #[test]
    fn test_extreme_forget_rate_ignores_caller_chance() {
        let mut cx = WidgetContext::with_random(SeededRandom::new(0x5eed));
        cx.set_mood(MoodLevel::Extreme);
        let (id, calls) = mount_counted(&mut cx, 0.05);

        let trials = 4000;
        for _ in 0..trials {
            cx.click(id, &ClickEvent::default()).unwrap();
            cx.advance_until_quiet(20_000).unwrap();
            assert!(cx.machine::<DissociatingMachine>(id).unwrap().is_idle());
        }

        let forget_rate = 1.0 - f64::from(calls.get()) / f64::from(trials);
        assert!(
            (forget_rate - 0.6).abs() < 0.04,
            "forget rate {forget_rate} should approach 0.6"
        );
    }

    #[test]
    fn test_full_sequence_returns_to_fresh_state() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.3, 0.1, 0.3, 0.9]));
        let (id, _) = mount_counted(&mut cx, 0.3);
        let fresh = cx.display(id).unwrap();

        for _ in 0..2 {
            cx.click(id, &ClickEvent::default()).unwrap();
            cx.advance_until_quiet(20_000).unwrap();
            assert_eq!(cx.display(id).unwrap(), fresh);
            assert_eq!(cx.pending_timers(id), 0);
        }
    }

    #[test]
    fn test_outcome_is_drawn_at_click() {
        // A: delay 0.0, outcome 0.9 (completes); B: delay 0.0, outcome 0.1 (forgets)
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.0, 0.9, 0.0, 0.1]));
        let (a, a_calls) = mount_counted(&mut cx, 0.3);
        let (b, b_calls) = mount_counted(&mut cx, 0.3);

        cx.click(a, &ClickEvent::default()).unwrap();
        assert!(matches!(
            phase(&cx, a),
            DissociatePhase::Loading {
                will_forget: false,
                ..
            }
        ));
        cx.click(b, &ClickEvent::default()).unwrap();
        cx.advance(3000).unwrap();

        assert_eq!(phase(&cx, a), DissociatePhase::Idle);
        assert_eq!(a_calls.get(), 1);
        assert_eq!(phase(&cx, b), DissociatePhase::Forgot);
        assert_eq!(b_calls.get(), 0);
    }

    #[test]
    fn test_unmount_while_loading_never_calls_back() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.5, 0.9]));
        let (id, calls) = mount_counted(&mut cx, 0.0);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert!(cx.unmount(id));
        cx.advance(60_000).unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(cx.stats().pending_timers, 0);
    }
}
