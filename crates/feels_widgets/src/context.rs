//! Widget Context - hosts mounted widgets and drives their timers
//!
//! The WidgetContext provides:
//! - Mounting and unmounting widgets, each with its own machine and flash
//! - Pointer and click dispatch
//! - A virtual clock that fires due timers in schedule order
//! - The shared mood every widget reads unless pinned to its own
//!
//! Everything is single-threaded. Each handler and timer callback runs to
//! completion before the next one starts.

use feels_core::prelude::*;
use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::widget::{Attributes, Content, DisplayState, Machine, NodeRef, WidgetProps};

/// Per-widget data stored in the context
struct WidgetSlot {
    machine: Box<dyn Machine>,
    flash: ClickFlash,
    content: Content,
    /// Pinned mood, if any
    mood: Option<MoodLevel>,
    attributes: Attributes,
    bounds: Option<Rect>,
    hovered: bool,
    node_ref: Option<NodeRef>,
}

/// Counts for diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContextStats {
    pub mounted: usize,
    pub pending_timers: usize,
    pub now: u64,
}

/// The host for every mounted widget
pub struct WidgetContext {
    scheduler: Scheduler,
    rng: Box<dyn RandomSource>,
    mood: MoodLevel,
    widgets: SlotMap<WidgetId, WidgetSlot>,
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetContext {
    /// Create a context drawing from thread-local entropy
    pub fn new() -> Self {
        Self::with_random(ThreadRandom::new())
    }

    /// Create a context with an explicit random source
    pub fn with_random(rng: impl RandomSource + 'static) -> Self {
        Self {
            scheduler: Scheduler::new(),
            rng: Box::new(rng),
            mood: MoodLevel::default(),
            widgets: SlotMap::with_key(),
        }
    }

    // =========================================================================
    // Mood
    // =========================================================================

    /// The shared mood
    pub fn mood(&self) -> MoodLevel {
        self.mood
    }

    /// Change the shared mood. Running sequences keep the parameters they
    /// started with; the new mood applies from each widget's next interaction.
    pub fn set_mood(&mut self, mood: MoodLevel) {
        if self.mood != mood {
            debug!(from = %self.mood, to = %mood, "shared mood changed");
        }
        self.mood = mood;
    }

    /// Pin a widget to its own mood, or `None` to follow the shared one
    pub fn set_widget_mood(&mut self, id: WidgetId, mood: Option<MoodLevel>) {
        if let Some(slot) = self.widgets.get_mut(id) {
            slot.mood = mood;
        }
    }

    /// Mood in effect for `id`
    pub fn effective_mood(&self, id: WidgetId) -> Option<MoodLevel> {
        self.widgets.get(id).map(|slot| slot.mood.unwrap_or(self.mood))
    }

    // =========================================================================
    // Mounting
    // =========================================================================

    /// Mount a machine with its props
    pub fn mount(&mut self, machine: impl Machine, props: WidgetProps) -> WidgetId {
        let kind = machine.kind();
        let WidgetProps {
            content,
            mood,
            on_click: _,
            mut attributes,
            node_ref,
        } = props;

        if kind.uses_motion_layer() {
            let stripped = attributes.strip_motion_conflicts();
            if stripped > 0 {
                trace!(%kind, stripped, "dropped motion-reserved attributes");
            }
        }

        let id = self.widgets.insert(WidgetSlot {
            machine: Box::new(machine),
            flash: ClickFlash::new(),
            content: content.unwrap_or_else(|| Content::text(kind.default_label())),
            mood,
            attributes,
            bounds: None,
            hovered: false,
            node_ref,
        });

        if let Some(node_ref) = &self.widgets[id].node_ref {
            node_ref.set(id);
        }
        debug!(?id, %kind, "widget mounted");
        id
    }

    /// Tear a widget down, cancelling everything it had pending.
    ///
    /// Returns false if it was not mounted.
    pub fn unmount(&mut self, id: WidgetId) -> bool {
        let Some(mut slot) = self.widgets.remove(id) else {
            return false;
        };

        let mood = slot.mood.unwrap_or(self.mood);
        let mut cx = MachineCx::new(&mut self.scheduler, &mut *self.rng, id, mood);
        slot.machine.cancel_all(&mut cx);
        slot.flash.cancel(&mut cx);

        let leftover = self.scheduler.cancel_owned_by(id);
        if leftover > 0 {
            warn!(
                ?id,
                kind = %slot.machine.kind(),
                leftover,
                "machine left timers behind on teardown"
            );
        }
        if let Some(node_ref) = &slot.node_ref {
            node_ref.clear();
        }
        debug!(?id, kind = %slot.machine.kind(), "widget unmounted");
        true
    }

    pub fn is_mounted(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    /// Ids of every mounted widget
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.keys()
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    /// Run `f` against a mounted widget with a machine context scoped to it
    fn dispatch<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut WidgetSlot, &mut MachineCx<'_>) -> R,
    ) -> Option<R> {
        let slot = self.widgets.get_mut(id)?;
        let mood = slot.mood.unwrap_or(self.mood);
        let mut cx = MachineCx::new(&mut self.scheduler, &mut *self.rng, id, mood);
        Some(f(slot, &mut cx))
    }

    /// Pointer entered the widget
    pub fn pointer_enter(&mut self, id: WidgetId) {
        self.dispatch(id, |slot, cx| {
            if !slot.hovered {
                slot.hovered = true;
                slot.machine.pointer_enter(cx);
            }
        });
    }

    /// Pointer left the widget
    pub fn pointer_leave(&mut self, id: WidgetId) {
        self.dispatch(id, |slot, cx| {
            if slot.hovered {
                slot.hovered = false;
                slot.machine.pointer_leave(cx);
            }
        });
    }

    /// Pointer moved within the widget's surroundings
    pub fn pointer_move(&mut self, id: WidgetId, point: Point) {
        self.dispatch(id, |slot, cx| {
            slot.machine.pointer_move(cx, point, slot.bounds);
        });
    }

    /// Record the control's on-screen geometry
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) {
        if let Some(slot) = self.widgets.get_mut(id) {
            slot.bounds = Some(bounds);
        }
    }

    /// A physical click on the widget.
    ///
    /// Lights the click flash and hands the click to the machine unless the
    /// widget is currently disabled. A failing callback surfaces here after
    /// the machine has committed its transition.
    pub fn click(&mut self, id: WidgetId, event: &ClickEvent) -> Result<()> {
        let outcome = self
            .dispatch(id, |slot, cx| {
                if !slot.machine.accepts_click() {
                    trace!(?id, kind = %slot.machine.kind(), "click swallowed while disabled");
                    return Ok(());
                }
                slot.flash.trigger(cx);
                slot.machine.click(cx, event)
            })
            .ok_or(EngineError::NotMounted(id))?;
        Ok(outcome?)
    }

    // =========================================================================
    // Clock
    // =========================================================================

    /// Current clock value
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Move the clock forward by `dt`, firing every timer that comes due.
    ///
    /// If a callback fails, the clock stops at that timer's due time and the
    /// error is returned; anything else due fires on the next advance.
    pub fn advance(&mut self, dt: u64) -> Result<()> {
        let target = self.scheduler.now().saturating_add(dt);
        while let Some(fired) = self.scheduler.pop_due(target) {
            self.deliver(&fired)?;
        }
        self.scheduler.settle_at(target);
        Ok(())
    }

    fn deliver(&mut self, fired: &FiredTimer) -> Result<()> {
        let outcome = self.dispatch(fired.owner, |slot, cx| {
            if fired.token == TimerToken::CLICK_FLASH {
                slot.flash.on_timer(fired);
                return Ok(());
            }
            slot.machine.timer_fired(cx, fired)
        });
        match outcome {
            Some(result) => Ok(result?),
            None => {
                trace!(id = ?fired.id, owner = ?fired.owner, "timer for unmounted widget dropped");
                Ok(())
            }
        }
    }

    /// When the next pending timer comes due
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Advance until no single-shot timer is pending, or `limit` has passed.
    ///
    /// Repeating timers keep running but do not hold the clock. Returns the
    /// time advanced.
    pub fn advance_until_quiet(&mut self, limit: u64) -> Result<u64> {
        let start = self.now();
        let deadline = start.saturating_add(limit);
        while self.scheduler.pending_once() > 0 {
            match self.scheduler.next_due() {
                Some(due) if due <= deadline => self.advance(due - self.now())?,
                _ => break,
            }
        }
        Ok(self.now() - start)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current display state for the widget
    pub fn display(&self, id: WidgetId) -> Option<DisplayState> {
        let slot = self.widgets.get(id)?;
        let mood = slot.mood.unwrap_or(self.mood);
        let mut state = slot.machine.display(&slot.content, mood);
        state.flashed = slot.flash.is_lit();
        state.hovered = slot.hovered;
        Some(state)
    }

    /// Typed access to a widget's machine
    pub fn machine<M: Machine>(&self, id: WidgetId) -> Option<&M> {
        self.widgets.get(id)?.machine.as_any().downcast_ref::<M>()
    }

    /// Typed mutable access to a widget's machine
    pub fn machine_mut<M: Machine>(&mut self, id: WidgetId) -> Option<&mut M> {
        self.widgets.get_mut(id)?.machine.as_any_mut().downcast_mut::<M>()
    }

    pub fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.widgets.get(id).map(|slot| slot.machine.kind())
    }

    pub fn content(&self, id: WidgetId) -> Option<&Content> {
        self.widgets.get(id).map(|slot| &slot.content)
    }

    /// Pass-through attributes, with motion-reserved handlers already removed
    pub fn attributes(&self, id: WidgetId) -> Option<&Attributes> {
        self.widgets.get(id).map(|slot| &slot.attributes)
    }

    pub fn is_flashed(&self, id: WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|slot| slot.flash.is_lit())
    }

    /// Timers the widget currently has pending, flash included
    pub fn pending_timers(&self, id: WidgetId) -> usize {
        self.scheduler.pending_for(id)
    }

    pub fn stats(&self) -> ContextStats {
        ContextStats {
            mounted: self.widgets.len(),
            pending_timers: self.scheduler.pending(),
            now: self.scheduler.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaslighting::gaslighting;
    use crate::passive_aggressive::passive_aggressive;
    use crate::widget::WidgetBuilder;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_flash_lights_on_click_and_clears() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = passive_aggressive().mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert!(cx.display(id).unwrap().flashed);

        cx.advance(220).unwrap();
        assert!(!cx.display(id).unwrap().flashed);
    }

    #[test]
    fn test_click_on_unmounted_widget_reports_not_mounted() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = passive_aggressive().mount(&mut cx);
        assert!(cx.unmount(id));
        assert!(!cx.unmount(id));

        let err = cx.click(id, &ClickEvent::default()).unwrap_err();
        assert!(matches!(err, EngineError::NotMounted(gone) if gone == id));

        // Pointer events are silently ignored
        cx.pointer_enter(id);
        cx.pointer_move(id, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_unmount_mid_sequence_cancels_everything() {
        let calls = Rc::new(Cell::new(0));
        let sink = calls.clone();
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting()
            .on_click(move |_| sink.set(sink.get() + 1))
            .mount(&mut cx);

        cx.click(id, &ClickEvent::default()).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(cx.pending_timers(id) > 0);

        assert!(cx.unmount(id));
        assert_eq!(cx.stats().pending_timers, 0);
        cx.advance(10_000).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_node_ref_tracks_mount() {
        let node = NodeRef::new();
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = passive_aggressive().node_ref(&node).mount(&mut cx);
        assert_eq!(node.get(), Some(id));

        cx.unmount(id);
        assert_eq!(node.get(), None);
    }

    #[test]
    fn test_motion_attributes_stripped_for_motion_widgets_only() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let motion = gaslighting()
            .attr("onDrag", "handler")
            .attr("id", "save")
            .mount(&mut cx);
        let plain = passive_aggressive().attr("onDrag", "handler").mount(&mut cx);

        let attrs = cx.attributes(motion).unwrap();
        assert!(!attrs.contains("onDrag"));
        assert_eq!(attrs.get("id"), Some("save"));
        assert!(cx.attributes(plain).unwrap().contains("onDrag"));
    }

    #[test]
    fn test_default_content_per_kind() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting().mount(&mut cx);
        assert_eq!(cx.content(id), Some(&Content::text("Save")));
        assert_eq!(cx.display(id).unwrap().accessible_label, "Save");
    }

    #[test]
    fn test_pinned_mood_overrides_shared() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        cx.set_mood(MoodLevel::Subtle);
        let pinned = gaslighting().mood(MoodLevel::Extreme).mount(&mut cx);
        let shared = gaslighting().mount(&mut cx);

        assert_eq!(cx.effective_mood(pinned), Some(MoodLevel::Extreme));
        assert_eq!(cx.effective_mood(shared), Some(MoodLevel::Subtle));
        cx.set_widget_mood(pinned, None);
        assert_eq!(cx.effective_mood(pinned), Some(MoodLevel::Subtle));
    }

    #[test]
    fn test_advance_stops_at_failing_timer() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([0.0, 0.99]));
        let id = crate::dissociating::dissociating()
            .try_on_click(|_| anyhow::bail!("backend down"))
            .mount(&mut cx);

        // Delay draw 0.0 -> 3000ms, forget draw 0.99 -> completes
        cx.click(id, &ClickEvent::default()).unwrap();
        let err = cx.advance(10_000).unwrap_err();
        assert_eq!(err.to_string(), "backend down");
        assert!(err.callback_error().is_some());
        assert_eq!(cx.now(), 3000);

        cx.advance(0).unwrap();
        assert_eq!(cx.stats().pending_timers, 0);
    }

    #[test]
    fn test_advance_until_quiet_ignores_repeating_timers() {
        let mut cx = WidgetContext::with_random(SequenceRandom::new([]));
        let id = gaslighting().mount(&mut cx);
        let thinker = crate::overthinking::overthinking().mount(&mut cx);

        cx.pointer_enter(thinker);
        cx.click(id, &ClickEvent::default()).unwrap();
        let spent = cx.advance_until_quiet(60_000).unwrap();

        // 500ms alternate label, then 2000ms denial
        assert_eq!(spent, 2500);
        assert_eq!(cx.pending_timers(id), 0);
        assert_eq!(cx.pending_timers(thinker), 1);
    }
}
