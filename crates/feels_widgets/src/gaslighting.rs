//! Gaslighting button
//!
//! Acts immediately, briefly shows a different label, then insists it never
//! did. A click mid-sequence starts the whole thing over.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::{timing, GaslightingParams};
use feels_core::prelude::*;
use tracing::debug;

use crate::context::WidgetContext;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Alternate label used when the caller supplies none
pub const DEFAULT_ALTERNATE_LABEL: &str = "Delete";
/// Tooltip shown after reverting
pub const DENIAL: &str = "I never said that.";

const REVERT: TimerToken = TimerToken(0);
const FORGET_DENIAL: TimerToken = TimerToken(1);

/// Gaslighting configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaslightingConfig {
    pub alternate_label: String,
}

impl Default for GaslightingConfig {
    fn default() -> Self {
        Self {
            alternate_label: DEFAULT_ALTERNATE_LABEL.to_string(),
        }
    }
}

/// Gaslighting phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GaslightPhase {
    Idle,
    /// Showing the alternate label
    Flashing,
    /// Showing the denial
    Denying,
}

/// Gaslighting interaction state
#[derive(Debug)]
pub struct GaslightingMachine {
    config: GaslightingConfig,
    phase: GaslightPhase,
    advance: TimerSlot,
    denials: u32,
    on_click: ClickCallback,
}

impl GaslightingMachine {
    pub fn new(config: GaslightingConfig, on_click: ClickCallback) -> Self {
        Self {
            config,
            phase: GaslightPhase::Idle,
            advance: TimerSlot::new(),
            denials: 0,
            on_click,
        }
    }

    pub fn phase(&self) -> GaslightPhase {
        self.phase
    }

    /// How many times the denial has been shown since mount
    pub fn denials(&self) -> u32 {
        self.denials
    }
}

impl Machine for GaslightingMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Gaslighting
    }

    fn click(&mut self, cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        let params = GaslightingParams::resolve(cx.mood());
        if self.phase != GaslightPhase::Idle {
            debug!(owner = ?cx.owner(), phase = ?self.phase, "gaslighting: restarting sequence");
        }
        self.phase = GaslightPhase::Flashing;
        self.advance.once(cx, params.flash_ms, REVERT);
        self.on_click.call(event)
    }

    fn timer_fired(&mut self, cx: &mut MachineCx<'_>, fired: &FiredTimer) -> CallbackResult {
        if !self.advance.claim(fired) {
            return Ok(());
        }
        match (fired.token, self.phase) {
            (REVERT, GaslightPhase::Flashing) => {
                self.phase = GaslightPhase::Denying;
                self.denials += 1;
                self.advance.once(cx, timing::DENIAL_MS, FORGET_DENIAL);
            }
            (FORGET_DENIAL, GaslightPhase::Denying) => {
                self.phase = GaslightPhase::Idle;
            }
            _ => {}
        }
        Ok(())
    }

    fn cancel_all(&mut self, cx: &mut MachineCx<'_>) {
        self.advance.cancel(cx);
        self.phase = GaslightPhase::Idle;
    }

    fn pending_timers(&self) -> usize {
        usize::from(self.advance.is_pending())
    }

    fn display(&self, content: &Content, _mood: MoodLevel) -> DisplayState {
        let mut state = DisplayState::new(WidgetKind::Gaslighting, content.clone());
        match self.phase {
            GaslightPhase::Idle => {}
            GaslightPhase::Flashing => {
                state.set_label(Content::text(self.config.alternate_label.clone()));
                state.visual = Visual::Alarming;
            }
            GaslightPhase::Denying => state.tooltip = Some(DENIAL.to_string()),
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

/// Create a gaslighting button
pub fn gaslighting() -> GaslightingBuilder {
    GaslightingBuilder {
        props: WidgetProps::default(),
        config: GaslightingConfig::default(),
    }
}

/// Builder for gaslighting buttons
pub struct GaslightingBuilder {
    props: WidgetProps,
    config: GaslightingConfig,
}

impl GaslightingBuilder {
    /// Label briefly shown after a click
    pub fn alternate_label(mut self, label: impl Into<String>) -> Self {
        self.config.alternate_label = label.into();
        self
    }
}

impl WidgetBuilder for GaslightingBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = GaslightingMachine::new(self.config, self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn machine(cx: &WidgetContext, id: WidgetId) -> &GaslightingMachine {
        cx.machine::<GaslightingMachine>(id).unwrap()
    }

    #[test]
    fn test_flash_then_deny_then_quiet() {
        let calls = Rc::new(Cell::new(0));
        let sink = calls.clone();
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting()
            .alternate_label("Erase")
            .on_click(move |_| sink.set(sink.get() + 1))
            .mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(calls.get(), 1);
        let state = cx.display(id).unwrap();
        assert_eq!(state.label, Content::text("Erase"));
        assert_eq!(state.visual, Visual::Alarming);

        cx.advance(500).unwrap();
        let state = cx.display(id).unwrap();
        assert_eq!(state.label, Content::text("Save"));
        assert_eq!(state.tooltip.as_deref(), Some(DENIAL));

        cx.advance(2000).unwrap();
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Idle);
        assert_eq!(cx.display(id).unwrap().tooltip, None);
        assert_eq!(cx.pending_timers(id), 0);
    }

    #[test]
    fn test_reclick_during_flash_restarts_without_stacking() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        cx.set_mood(MoodLevel::Extreme);
        let id = gaslighting().mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        cx.advance(600).unwrap();
        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(machine(&cx, id).pending_timers(), 1);

        // The first revert (due at 800) was cancelled
        cx.advance(700).unwrap();
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Flashing);
        assert_eq!(machine(&cx, id).denials(), 0);

        cx.advance(100).unwrap();
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Denying);
        cx.advance_until_quiet(10_000).unwrap();
        assert_eq!(machine(&cx, id).denials(), 1);
    }

    #[test]
    fn test_reclick_during_denial_restarts_from_flash() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting().mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        cx.advance(1000).unwrap();
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Denying);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Flashing);
        cx.advance_until_quiet(10_000).unwrap();
        assert_eq!(machine(&cx, id).denials(), 2);
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Idle);
    }

    #[test]
    fn test_callback_error_after_transition_committed() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting()
            .try_on_click(|_| anyhow::bail!("quota exceeded"))
            .mount(&mut cx);

        let err = cx.click(id, &ClickEvent::default()).unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Flashing);

        cx.advance_until_quiet(10_000).unwrap();
        assert_eq!(machine(&cx, id).phase(), GaslightPhase::Idle);
    }

    #[test]
    fn test_full_sequence_returns_to_fresh_state() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting().mount(&mut cx);
        let fresh = cx.display(id).unwrap();

        for _ in 0..2 {
            cx.click(id, &ClickEvent::default()).unwrap();
            cx.advance_until_quiet(10_000).unwrap();
            assert_eq!(cx.display(id).unwrap(), fresh);
            assert_eq!(cx.pending_timers(id), 0);
        }
    }
}
