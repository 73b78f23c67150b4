//! Imposter syndrome button
//!
//! Does the job, then apologizes for it. Hovering adds a hedge to the label.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::{timing, ImposterParams};
use feels_core::prelude::*;
use tracing::debug;

use crate::context::WidgetContext;
use crate::widget::{Content, DisplayState, Machine, WidgetBuilder, WidgetProps};

const APOLOGY_DONE: TimerToken = TimerToken(0);

/// Imposter syndrome phases
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImposterPhase {
    Idle,
    /// The apology picked when the click landed
    Apologizing(&'static str),
}

/// Imposter syndrome interaction state
#[derive(Debug)]
pub struct ImposterMachine {
    hovered: bool,
    phase: ImposterPhase,
    apology: TimerSlot,
    on_click: ClickCallback,
}

impl ImposterMachine {
    pub fn new(on_click: ClickCallback) -> Self {
        Self {
            hovered: false,
            phase: ImposterPhase::Idle,
            apology: TimerSlot::new(),
            on_click,
        }
    }

    pub fn phase(&self) -> ImposterPhase {
        self.phase
    }
}

/// The hedged version of a text label
pub fn hedged_label(text: &str) -> String {
    format!("{text} Probably?")
}

impl Machine for ImposterMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ImposterSyndrome
    }

    fn pointer_enter(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = true;
    }

    fn pointer_leave(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = false;
    }

    fn click(&mut self, cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        let params = ImposterParams::resolve(cx.mood());
        self.phase = ImposterPhase::Apologizing(params.apology);
        self.apology.once(cx, timing::APOLOGY_MS, APOLOGY_DONE);
        debug!(owner = ?cx.owner(), "imposter-syndrome: apologizing");
        self.on_click.call(event)
    }

    fn timer_fired(&mut self, _cx: &mut MachineCx<'_>, fired: &FiredTimer) -> CallbackResult {
        if self.apology.claim(fired) {
            self.phase = ImposterPhase::Idle;
        }
        Ok(())
    }

    fn cancel_all(&mut self, cx: &mut MachineCx<'_>) {
        self.apology.cancel(cx);
        self.phase = ImposterPhase::Idle;
        self.hovered = false;
    }

    fn pending_timers(&self) -> usize {
        usize::from(self.apology.is_pending())
    }

    fn display(&self, content: &Content, _mood: MoodLevel) -> DisplayState {
        let mut state = DisplayState::new(WidgetKind::ImposterSyndrome, content.clone());
        if self.hovered {
            if let Some(text) = content.as_text() {
                state.set_label(Content::Text(hedged_label(text)));
            }
        }
        if let ImposterPhase::Apologizing(apology) = self.phase {
            state.tooltip = Some(apology.to_string());
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

/// Create an imposter syndrome button
pub fn imposter_syndrome() -> ImposterBuilder {
    ImposterBuilder {
        props: WidgetProps::default(),
    }
}

/// Builder for imposter syndrome buttons
pub struct ImposterBuilder {
    props: WidgetProps,
}

impl WidgetBuilder for ImposterBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = ImposterMachine::new(self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}
