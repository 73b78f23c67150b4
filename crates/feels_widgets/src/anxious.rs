//! Anxious button
//!
//! Trembles while hovered and offers an uninvited tooltip. Clicks go straight
//! through to the callback.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::AnxiousParams;
use feels_core::prelude::*;
use tracing::debug;

use crate::context::WidgetContext;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Tooltip shown while hovered
pub const REASSURANCE: &str = "Are you sure you want to do this? I'm just asking...";

/// Anxious interaction state
#[derive(Debug)]
pub struct AnxiousMachine {
    hovered: bool,
    on_click: ClickCallback,
}

impl AnxiousMachine {
    pub fn new(on_click: ClickCallback) -> Self {
        Self {
            hovered: false,
            on_click,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl Machine for AnxiousMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Anxious
    }

    fn pointer_enter(&mut self, cx: &mut MachineCx<'_>) {
        self.hovered = true;
        debug!(owner = ?cx.owner(), "anxious: trembling");
    }

    fn pointer_leave(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = false;
    }

    fn click(&mut self, _cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        self.on_click.call(event)
    }

    fn cancel_all(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = false;
    }

    fn pending_timers(&self) -> usize {
        0
    }

    fn display(&self, content: &Content, mood: MoodLevel) -> DisplayState {
        let state = DisplayState::new(WidgetKind::Anxious, content.clone());
        if !self.hovered {
            return state;
        }
        state
            .with_tooltip(REASSURANCE)
            .with_visual(Visual::Shaking(AnxiousParams::resolve(mood).shake))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Create an anxious button
pub fn anxious() -> AnxiousBuilder {
    AnxiousBuilder {
        props: WidgetProps::default(),
    }
}

/// Builder for anxious buttons
pub struct AnxiousBuilder {
    props: WidgetProps,
}

impl WidgetBuilder for AnxiousBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = AnxiousMachine::new(self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_shows_tooltip_and_shake() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = anxious().mood(MoodLevel::Extreme).mount(&mut cx);

        cx.pointer_enter(id);
        let state = cx.display(id).unwrap();
        assert_eq!(state.tooltip.as_deref(), Some(REASSURANCE));
        match state.visual {
            Visual::Shaking(shake) => {
                assert_eq!(shake.period_ms, 300);
                assert!(shake.rotation.is_some());
            }
            other => panic!("expected shaking, got {other:?}"),
        }

        cx.pointer_leave(id);
        let state = cx.display(id).unwrap();
        assert_eq!(state.tooltip, None);
        assert_eq!(state.visual, Visual::Plain);
    }

    #[test]
    fn test_click_invokes_callback_immediately() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let clicks = std::rc::Rc::new(std::cell::Cell::new(0));
        let sink = clicks.clone();
        let id = anxious()
            .on_click(move |_| sink.set(sink.get() + 1))
            .mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(clicks.get(), 1);
        assert_eq!(cx.display(id).unwrap().label, Content::text("Submit"));
    }
}
