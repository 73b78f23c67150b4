//! Widget contract
//!
//! Everything the ten widgets share: the [`Machine`] trait every interaction
//! state machine implements, the [`DisplayState`] a presentation layer
//! renders from, and the uniform props (content, mood, click callback,
//! pass-through attributes, reference handle) every builder accepts.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::{ShakePattern, Tone};
use feels_core::prelude::*;
use indexmap::IndexMap;

use crate::context::WidgetContext;
use crate::identity_crisis::Era;

// ============================================================================
// Content
// ============================================================================

/// What a widget shows as its children
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    /// Plain text, eligible for label substitution
    Text(String),
    /// A non-text node (icon, image, markup) identified by the presentation
    /// layer; never rewritten
    Custom(String),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Custom(_) => None,
        }
    }

    /// Label for assistive tech
    pub fn accessible_label(&self, kind: WidgetKind) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Custom(_) => kind.fallback_accessible_label(),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.write_str(text),
            Content::Custom(node) => write!(f, "<{node}>"),
        }
    }
}

// ============================================================================
// Display state
// ============================================================================

/// Visual variant the presentation layer should render
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    Plain,
    /// Repeating tremble
    Shaking(ShakePattern),
    /// Displaced from its resting position
    Offset { x: f32, y: f32 },
    /// Repeating grow-and-shrink
    Pulsing { scale: f32, period_ms: u64 },
    /// Progress through a confirmation ladder
    Confirming { stage: usize, total: usize },
    /// Faded while busy
    Dimmed,
    /// Danger styling
    Alarming,
    /// Styled after a design era
    Era(Era),
    /// Reply text in a mood-dependent register
    Toned(Tone),
    /// Busy spinner next to the label
    Spinning,
}

/// Pointer cursor hint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Pointer,
    NotAllowed,
    Wait,
}

/// Published state of one widget, rebuilt on every read
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    pub kind: WidgetKind,
    pub label: Content,
    pub tooltip: Option<String>,
    pub visual: Visual,
    /// Work is in flight
    pub busy: bool,
    /// Clicks are swallowed
    pub disabled: bool,
    /// Announced as disabled to assistive tech, regardless of `disabled`
    pub aria_disabled: bool,
    /// Click flash is lit
    pub flashed: bool,
    pub hovered: bool,
    /// Cursor over the control itself
    pub cursor: Cursor,
    /// Cursor over the area surrounding the control
    pub hitbox_cursor: Cursor,
    pub accessible_label: String,
}

impl DisplayState {
    /// Resting state showing `label`
    pub fn new(kind: WidgetKind, label: Content) -> Self {
        let accessible_label = label.accessible_label(kind);
        Self {
            kind,
            label,
            tooltip: None,
            visual: Visual::Plain,
            busy: false,
            disabled: false,
            aria_disabled: false,
            flashed: false,
            hovered: false,
            cursor: Cursor::Pointer,
            hitbox_cursor: Cursor::Pointer,
            accessible_label,
        }
    }

    /// Replace the label, keeping the accessible label in step
    pub fn set_label(&mut self, label: Content) {
        self.accessible_label = label.accessible_label(self.kind);
        self.label = label;
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }
}

// ============================================================================
// Machine
// ============================================================================

/// An interaction state machine.
///
/// Handlers run to completion against a [`MachineCx`] scoped to the widget.
/// Any timer a machine schedules must be released by
/// [`Machine::cancel_all`]; the context also sweeps the widget's timers on
/// unmount and warns about any the machine forgot.
pub trait Machine: Any {
    fn kind(&self) -> WidgetKind;

    fn pointer_enter(&mut self, _cx: &mut MachineCx<'_>) {}

    fn pointer_leave(&mut self, _cx: &mut MachineCx<'_>) {}

    /// Pointer moved over the widget's surroundings; `bounds` is the
    /// control's last known geometry
    fn pointer_move(&mut self, _cx: &mut MachineCx<'_>, _point: Point, _bounds: Option<Rect>) {}

    /// Whether a physical click reaches the machine (and lights the flash)
    fn accepts_click(&self) -> bool {
        true
    }

    fn click(&mut self, cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult;

    /// One of this machine's timers came due
    fn timer_fired(&mut self, _cx: &mut MachineCx<'_>, _fired: &FiredTimer) -> CallbackResult {
        Ok(())
    }

    /// Cancel every pending timer and return to the initial phase
    fn cancel_all(&mut self, cx: &mut MachineCx<'_>);

    /// Timers this machine currently owns
    fn pending_timers(&self) -> usize;

    fn display(&self, content: &Content, mood: MoodLevel) -> DisplayState;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ============================================================================
// Pass-through attributes
// ============================================================================

/// Handler names reserved by the motion layer
pub const MOTION_RESERVED_ATTRIBUTES: [&str; 6] = [
    "onDrag",
    "onDragStart",
    "onDragEnd",
    "onDragOver",
    "onAnimationStart",
    "onAnimationEnd",
];

/// Interactive attributes forwarded untouched to the rendered element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Silently drop the motion layer's reserved handlers, returning how many
    /// were removed
    pub fn strip_motion_conflicts(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|name, _| !MOTION_RESERVED_ATTRIBUTES.contains(&name.as_str()));
        before - self.entries.len()
    }
}

// ============================================================================
// Reference handle
// ============================================================================

/// Shared handle to a mounted widget.
///
/// Set when the widget mounts and cleared when it unmounts, so a holder can
/// always tell whether the id is still live.
#[derive(Clone, Default)]
pub struct NodeRef(Rc<Cell<Option<WidgetId>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<WidgetId> {
        self.0.get()
    }

    pub(crate) fn set(&self, id: WidgetId) {
        self.0.set(Some(id));
    }

    pub(crate) fn clear(&self) {
        self.0.set(None);
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.get()).finish()
    }
}

// ============================================================================
// Props and builders
// ============================================================================

/// The props every widget accepts
#[derive(Debug, Default)]
pub struct WidgetProps {
    pub content: Option<Content>,
    /// Per-widget mood; falls back to the context's shared mood
    pub mood: Option<MoodLevel>,
    pub on_click: ClickCallback,
    pub attributes: Attributes,
    pub node_ref: Option<NodeRef>,
}

impl WidgetProps {
    /// Take the click callback out for the machine to own
    pub fn take_on_click(&mut self) -> ClickCallback {
        std::mem::take(&mut self.on_click)
    }
}

/// Common builder methods shared by every widget
pub trait WidgetBuilder: Sized {
    fn props_mut(&mut self) -> &mut WidgetProps;

    /// Mount the widget and return its id
    fn mount(self, cx: &mut WidgetContext) -> WidgetId;

    /// Set text content
    fn label(self, label: impl Into<String>) -> Self {
        self.content(Content::Text(label.into()))
    }

    /// Set arbitrary content
    fn content(mut self, content: Content) -> Self {
        self.props_mut().content = Some(content);
        self
    }

    /// Pin this widget to a mood instead of following the shared one
    fn mood(mut self, mood: MoodLevel) -> Self {
        self.props_mut().mood = Some(mood);
        self
    }

    /// Set the click callback
    fn on_click<F: FnMut(&ClickEvent) + 'static>(mut self, callback: F) -> Self {
        self.props_mut().on_click = ClickCallback::new(callback);
        self
    }

    /// Set a click callback whose failure propagates out of the handler
    fn try_on_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ClickEvent) -> CallbackResult + 'static,
    {
        self.props_mut().on_click = ClickCallback::fallible(callback);
        self
    }

    /// Add a pass-through attribute
    fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props_mut().attributes.insert(name, value);
        self
    }

    /// Bind a reference handle
    fn node_ref(mut self, node_ref: &NodeRef) -> Self {
        self.props_mut().node_ref = Some(node_ref.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_motion_conflicts_keeps_order() {
        let mut attrs = Attributes::new();
        attrs.insert("id", "save");
        attrs.insert("onDragStart", "h1");
        attrs.insert("title", "Save it");
        attrs.insert("onAnimationEnd", "h2");

        assert_eq!(attrs.strip_motion_conflicts(), 2);
        let names: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "title"]);
    }

    #[test]
    fn test_accessible_label_for_custom_content() {
        let icon = Content::Custom("trash-icon".into());
        assert_eq!(
            icon.accessible_label(WidgetKind::Gaslighting),
            "Gaslighting button"
        );
        assert_eq!(
            Content::from("Save").accessible_label(WidgetKind::Gaslighting),
            "Save"
        );
    }

    #[test]
    fn test_set_label_updates_accessible_label() {
        let mut state = DisplayState::new(WidgetKind::Gaslighting, "Save".into());
        state.set_label("Delete".into());
        assert_eq!(state.accessible_label, "Delete");
    }
}
