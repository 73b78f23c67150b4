//! Emotionally unavailable button
//!
//! Announces itself as disabled but still works. While the pointer is within
//! one control-width of its center it drifts a fixed distance away on each
//! axis; leaving the hitbox brings it back.

use std::any::Any;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::UnavailableParams;
use feels_core::prelude::*;
use tracing::trace;

use crate::context::WidgetContext;
use crate::widget::{Content, Cursor, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// Emotionally unavailable interaction state
#[derive(Debug)]
pub struct UnavailableMachine {
    hovered: bool,
    offset: Point,
    on_click: ClickCallback,
}

impl UnavailableMachine {
    pub fn new(on_click: ClickCallback) -> Self {
        Self {
            hovered: false,
            offset: Point::default(),
            on_click,
        }
    }

    /// Current displacement from the resting position
    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// Offset pushing away from `pointer`, or `None` when it is out of range
fn repulsion(pointer: Point, bounds: Rect, distance: f32) -> Option<Point> {
    let center = bounds.center();
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    if dx.hypot(dy) >= bounds.width {
        return None;
    }
    let away = |delta: f32| if delta > 0.0 { -distance } else { distance };
    Some(Point::new(away(dx), away(dy)))
}

impl Machine for UnavailableMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::EmotionallyUnavailable
    }

    fn pointer_enter(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = true;
    }

    fn pointer_leave(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = false;
        self.offset = Point::default();
    }

    fn pointer_move(&mut self, cx: &mut MachineCx<'_>, point: Point, bounds: Option<Rect>) {
        let Some(bounds) = bounds else {
            return;
        };
        let params = UnavailableParams::resolve(cx.mood());
        if let Some(offset) = repulsion(point, bounds, params.avoid_distance) {
            trace!(
                owner = ?cx.owner(),
                x = offset.x,
                y = offset.y,
                "emotionally-unavailable: backing off"
            );
            self.offset = offset;
        }
    }

    fn click(&mut self, _cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        self.on_click.call(event)
    }

    fn cancel_all(&mut self, _cx: &mut MachineCx<'_>) {
        self.hovered = false;
        self.offset = Point::default();
    }

    fn pending_timers(&self) -> usize {
        0
    }

    fn display(&self, content: &Content, _mood: MoodLevel) -> DisplayState {
        let mut state = DisplayState::new(WidgetKind::EmotionallyUnavailable, content.clone())
            .with_visual(Visual::Offset {
                x: self.offset.x,
                y: self.offset.y,
            });
        state.aria_disabled = true;
        if self.hovered {
            state.hitbox_cursor = Cursor::NotAllowed;
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

/// Create an emotionally unavailable button
pub fn emotionally_unavailable() -> UnavailableBuilder {
    UnavailableBuilder {
        props: WidgetProps::default(),
    }
}

/// Builder for emotionally unavailable buttons
pub struct UnavailableBuilder {
    props: WidgetProps,
}

impl WidgetBuilder for UnavailableBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = UnavailableMachine::new(self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 100.0, 40.0);

    fn offset(cx: &WidgetContext, id: WidgetId) -> Point {
        cx.machine::<UnavailableMachine>(id).unwrap().offset()
    }

    #[test]
    fn test_moves_away_on_each_axis() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = emotionally_unavailable().mount(&mut cx);
        cx.set_bounds(id, BOUNDS);
        cx.pointer_enter(id);

        // Up and to the left of center (50, 20)
        cx.pointer_move(id, Point::new(30.0, 10.0));
        assert_eq!(offset(&cx, id), Point::new(8.0, 8.0));

        // Down and to the right
        cx.pointer_move(id, Point::new(70.0, 30.0));
        assert_eq!(offset(&cx, id), Point::new(-8.0, -8.0));
    }

    #[test]
    fn test_far_move_keeps_previous_offset() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        cx.set_mood(MoodLevel::Extreme);
        let id = emotionally_unavailable().mount(&mut cx);
        cx.set_bounds(id, BOUNDS);

        cx.pointer_move(id, Point::new(60.0, 20.0));
        assert_eq!(offset(&cx, id), Point::new(-16.0, 16.0));

        cx.pointer_move(id, Point::new(250.0, 20.0));
        assert_eq!(offset(&cx, id), Point::new(-16.0, 16.0));
    }

    #[test]
    fn test_leave_resets_offset_and_no_bounds_is_ignored() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = emotionally_unavailable().mount(&mut cx);

        cx.pointer_enter(id);
        cx.pointer_move(id, Point::new(1.0, 1.0));
        assert_eq!(offset(&cx, id), Point::default());

        cx.set_bounds(id, BOUNDS);
        cx.pointer_move(id, Point::new(40.0, 20.0));
        assert_ne!(offset(&cx, id), Point::default());
        assert_eq!(cx.display(id).unwrap().hitbox_cursor, Cursor::NotAllowed);

        cx.pointer_leave(id);
        assert_eq!(offset(&cx, id), Point::default());
    }

    #[test]
    fn test_aria_disabled_but_clickable() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let clicked = std::rc::Rc::new(std::cell::Cell::new(false));
        let sink = clicked.clone();
        let id = emotionally_unavailable()
            .on_click(move |_| sink.set(true))
            .mount(&mut cx);

        let state = cx.display(id).unwrap();
        assert!(state.aria_disabled);
        assert!(!state.disabled);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert!(clicked.get());
    }
}
