//! Overthinking button
//!
//! Spins and cycles through its doubts for as long as the pointer rests on
//! it. Clicks work instantly; the deliberation is purely for show.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::OverthinkingParams;
use feels_core::prelude::*;
use tracing::trace;

use crate::context::WidgetContext;
use crate::cycle::Rotation;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Overthinking interaction state
#[derive(Debug)]
pub struct OverthinkingMachine {
    /// Thoughts snapshotted when the hover began
    thoughts: &'static [&'static str],
    rotation: Rotation,
    on_click: ClickCallback,
}

impl OverthinkingMachine {
    pub fn new(on_click: ClickCallback) -> Self {
        Self {
            thoughts: &[],
            rotation: Rotation::default(),
            on_click,
        }
    }

    /// The thought currently on display, if hovered
    pub fn current_thought(&self) -> Option<&'static str> {
        self.rotation
            .current()
            .and_then(|index| self.thoughts.get(index).copied())
    }

    pub fn thought_index(&self) -> Option<usize> {
        self.rotation.current()
    }
}

impl Machine for OverthinkingMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Overthinking
    }

    fn pointer_enter(&mut self, cx: &mut MachineCx<'_>) {
        let params = OverthinkingParams::resolve(cx.mood());
        self.thoughts = params.thoughts;
        self.rotation.start(cx, params.thoughts.len(), params.period_ms);
    }

    fn pointer_leave(&mut self, cx: &mut MachineCx<'_>) {
        self.rotation.stop(cx);
    }

    fn click(&mut self, _cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        self.on_click.call(event)
    }

    fn timer_fired(&mut self, cx: &mut MachineCx<'_>, fired: &FiredTimer) -> CallbackResult {
        if self.rotation.tick(fired) {
            trace!(
                owner = ?cx.owner(),
                thought = ?self.current_thought(),
                "overthinking: next thought"
            );
        }
        Ok(())
    }

    fn cancel_all(&mut self, cx: &mut MachineCx<'_>) {
        self.rotation.stop(cx);
    }

    fn pending_timers(&self) -> usize {
        self.rotation.pending_timers()
    }

    fn display(&self, content: &Content, _mood: MoodLevel) -> DisplayState {
        let state = DisplayState::new(WidgetKind::Overthinking, content.clone());
        match self.current_thought() {
            Some(thought) => state.with_tooltip(thought).with_visual(Visual::Spinning),
            None => state,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Create an overthinking button
pub fn overthinking() -> OverthinkingBuilder {
    OverthinkingBuilder {
        props: WidgetProps::default(),
    }
}

/// Builder for overthinking buttons
pub struct OverthinkingBuilder {
    props: WidgetProps,
}

impl WidgetBuilder for OverthinkingBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = OverthinkingMachine::new(self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}
