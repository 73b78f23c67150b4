//! Overly eager button
//!
//! Pulses and begs the moment the pointer arrives.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::EagerParams;
use feels_core::prelude::*;

use crate::context::WidgetContext;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Overly eager interaction state
#[derive(Debug)]
pub struct EagerMachine {
    hovered: bool,
    on_click: ClickCallback,
}

impl EagerMachine {
    pub fn new(on_click: ClickCallback) -> Self {
        Self {
            hovered: false,
            on_click,
        }
    }
}

/// The begging version of a text label
pub fn eager_label(text: &str) -> String {
    if text.trim().eq_ignore_ascii_case("click") {
        "Click me! Please!".to_string()
    } else {
        format!("{text} me! Please!")
    }
}

impl Machine for EagerMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::OverlyEager
    }

    fn pointer_enter(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = true;
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
        let mut state = DisplayState::new(WidgetKind::OverlyEager, content.clone());
        if !self.hovered {
            return state;
        }
        if let Some(text) = content.as_text() {
            state.set_label(Content::Text(eager_label(text)));
        }
        let params = EagerParams::resolve(mood);
        state.with_visual(Visual::Pulsing {
            scale: params.pulse_scale,
            period_ms: params.pulse_period_ms,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Create an overly eager button
pub fn overly_eager() -> EagerBuilder {
    EagerBuilder {
        props: WidgetProps::default(),
    }
}

/// Builder for overly eager buttons
pub struct EagerBuilder {
    props: WidgetProps,
}

impl WidgetBuilder for EagerBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = EagerMachine::new(self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eager_label() {
        assert_eq!(eager_label(" Click "), "Click me! Please!");
        assert_eq!(eager_label("Pick"), "Pick me! Please!");
    }

    #[test]
    fn test_hover_pulses_and_begs() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = overly_eager().mood(MoodLevel::Extreme).mount(&mut cx);

        cx.pointer_enter(id);
        let state = cx.display(id).unwrap();
        assert_eq!(state.label, Content::text("Click me! Please!"));
        assert_eq!(state.accessible_label, "Click me! Please!");
        assert_eq!(
            state.visual,
            Visual::Pulsing {
                scale: 1.25,
                period_ms: 350
            }
        );

        cx.pointer_leave(id);
        assert_eq!(cx.display(id).unwrap().label, Content::text("Click"));
    }

    #[test]
    fn test_custom_content_is_left_alone() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = overly_eager()
            .content(Content::Custom("heart-icon".into()))
            .mount(&mut cx);

        cx.pointer_enter(id);
        let state = cx.display(id).unwrap();
        assert_eq!(state.label, Content::Custom("heart-icon".into()));
        assert_eq!(state.accessible_label, "Overly Eager button");
    }
}
