//! Passive-aggressive button
//!
//! Does exactly what it is asked, then replaces its own label with a sigh for
//! a mood-scaled window. A re-click restarts the window. Renders as a plain
//! element, so pass-through attributes reach it unfiltered.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::PassiveAggressiveParams;
use feels_core::prelude::*;
use tracing::debug;

use crate::context::WidgetContext;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// The reply shown after every click
pub const REPLY: &str = "Sure. If you want.";

const REPLY_DONE: TimerToken = TimerToken(0);

/// Passive-aggressive phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyPhase {
    Idle,
    Replying,
}

/// Passive-aggressive interaction state
#[derive(Debug)]
pub struct PassiveAggressiveMachine {
    phase: ReplyPhase,
    reply: TimerSlot,
    on_click: ClickCallback,
}

impl PassiveAggressiveMachine {
    pub fn new(on_click: ClickCallback) -> Self {
        Self {
            phase: ReplyPhase::Idle,
            reply: TimerSlot::new(),
            on_click,
        }
    }

    pub fn phase(&self) -> ReplyPhase {
        self.phase
    }
}

impl Machine for PassiveAggressiveMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::PassiveAggressive
    }

    fn click(&mut self, cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        let params = PassiveAggressiveParams::resolve(cx.mood());
        self.phase = ReplyPhase::Replying;
        self.reply.once(cx, params.message_ms, REPLY_DONE);
        self.on_click.call(event)
    }

    fn timer_fired(&mut self, cx: &mut MachineCx<'_>, fired: &FiredTimer) -> CallbackResult {
        if self.reply.claim(fired) {
            self.phase = ReplyPhase::Idle;
            debug!(owner = ?cx.owner(), "passive-aggressive: over it");
        }
        Ok(())
    }

    fn cancel_all(&mut self, cx: &mut MachineCx<'_>) {
        self.reply.cancel(cx);
        self.phase = ReplyPhase::Idle;
    }

    fn pending_timers(&self) -> usize {
        usize::from(self.reply.is_pending())
    }

    fn display(&self, content: &Content, mood: MoodLevel) -> DisplayState {
        let mut state = DisplayState::new(WidgetKind::PassiveAggressive, content.clone());
        if self.phase == ReplyPhase::Replying {
            state.set_label(Content::text(REPLY));
            state.visual = Visual::Toned(PassiveAggressiveParams::resolve(mood).tone);
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

/// Create a passive-aggressive button
pub fn passive_aggressive() -> PassiveAggressiveBuilder {
    PassiveAggressiveBuilder {
        props: WidgetProps::default(),
    }
}

/// Builder for passive-aggressive buttons
pub struct PassiveAggressiveBuilder {
    props: WidgetProps,
}

impl WidgetBuilder for PassiveAggressiveBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = PassiveAggressiveMachine::new(self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}
