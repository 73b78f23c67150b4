//! Demo harness
//!
//! Mounts one of every widget on a shared virtual clock, runs script steps
//! against them, and logs every callback that fires.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use feels_core::prelude::*;
use feels_widgets::prelude::*;
use tracing::{info, warn};

use crate::config::DemoConfig;
use crate::script::{Command, Step};

/// A callback that fired during the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRecord {
    pub kind: WidgetKind,
    /// Clock value when it fired
    pub at: u64,
    /// `onClick` or the ladder's `onConfirm`
    pub confirm: bool,
}

type CallbackLog = Rc<RefCell<Vec<CallbackRecord>>>;

/// Owns the widget context and one widget per kind
pub struct Harness {
    cx: WidgetContext,
    widgets: Vec<(WidgetKind, WidgetId)>,
    log: CallbackLog,
    clock: Rc<Cell<u64>>,
}

impl Harness {
    /// Mount the catalogue as configured
    pub fn new(config: &DemoConfig) -> Self {
        let mut cx = match config.seed {
            Some(seed) => WidgetContext::with_random(SeededRandom::new(seed)),
            None => WidgetContext::new(),
        };
        cx.set_mood(config.mood);

        let log = CallbackLog::default();
        let clock = Rc::new(Cell::new(0));
        let widgets = WidgetKind::ALL
            .into_iter()
            .map(|kind| (kind, mount_kind(&mut cx, kind, config, &log, &clock)))
            .collect();

        info!(
            mood = %config.mood,
            seed = ?config.seed,
            "mounted {} widgets",
            WidgetKind::ALL.len()
        );
        Self {
            cx,
            widgets,
            log,
            clock,
        }
    }

    pub fn context(&self) -> &WidgetContext {
        &self.cx
    }

    /// Id of the widget of `kind`, if still mounted
    pub fn widget(&self, kind: WidgetKind) -> Option<WidgetId> {
        self.widgets
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, id)| *id)
            .filter(|id| self.cx.is_mounted(*id))
    }

    /// Every callback fired so far
    pub fn callbacks(&self) -> Vec<CallbackRecord> {
        self.log.borrow().clone()
    }

    /// Run every step, collecting the lines `show` produced
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<String>> {
        let mut output = Vec::new();
        for step in steps {
            let lines = self
                .execute(&step.command)
                .with_context(|| format!("line {}: {:?} failed", step.line, step.command))?;
            output.extend(lines);
        }
        Ok(output)
    }

    /// Run one command
    pub fn execute(&mut self, command: &Command) -> Result<Vec<String>> {
        self.clock.set(self.cx.now());
        match *command {
            Command::Mood(mood) => self.cx.set_mood(mood),
            Command::Enter(kind) => self.with_widget(kind, |cx, id| cx.pointer_enter(id)),
            Command::Leave(kind) => self.with_widget(kind, |cx, id| cx.pointer_leave(id)),
            Command::Move(kind, point) => {
                self.with_widget(kind, |cx, id| cx.pointer_move(id, point))
            }
            Command::Bounds(kind, rect) => self.with_widget(kind, |cx, id| cx.set_bounds(id, rect)),
            Command::Click(kind, point) => {
                let Some(id) = self.widget(kind) else {
                    warn!(%kind, "click on unmounted widget ignored");
                    return Ok(Vec::new());
                };
                let event = ClickEvent {
                    position: point,
                    timestamp: self.cx.now(),
                    ..ClickEvent::default()
                };
                self.cx.click(id, &event)?;
            }
            Command::Wait(ms) => self.wait(ms)?,
            Command::Show(Some(kind)) => return Ok(self.describe(kind).into_iter().collect()),
            Command::Show(None) => {
                return Ok(WidgetKind::ALL
                    .into_iter()
                    .filter_map(|kind| self.describe(kind))
                    .collect())
            }
            Command::Unmount(kind) => {
                if let Some(id) = self.widget(kind) {
                    self.cx.unmount(id);
                    info!(%kind, "unmounted");
                }
            }
        }
        Ok(Vec::new())
    }

    /// Advance the clock one due timer at a time, so callbacks see the time
    /// they actually fired at
    fn wait(&mut self, ms: u64) -> Result<()> {
        let deadline = self.cx.now().saturating_add(ms);
        while let Some(due) = self.cx.next_due().filter(|due| *due <= deadline) {
            self.clock.set(due);
            self.cx.advance(due - self.cx.now())?;
        }
        self.cx.advance(deadline - self.cx.now())?;
        self.clock.set(self.cx.now());
        Ok(())
    }

    fn with_widget(&mut self, kind: WidgetKind, f: impl FnOnce(&mut WidgetContext, WidgetId)) {
        match self.widget(kind) {
            Some(id) => f(&mut self.cx, id),
            None => warn!(%kind, "event for unmounted widget ignored"),
        }
    }

    /// One-line summary of a widget's display state
    pub fn describe(&self, kind: WidgetKind) -> Option<String> {
        let id = self.widget(kind)?;
        let state = self.cx.display(id)?;
        let mut line = format!("{:<24} [{}]", kind.name(), state.label);
        if let Some(tooltip) = &state.tooltip {
            line.push_str(&format!(" tooltip={tooltip:?}"));
        }
        if state.visual != Visual::Plain {
            line.push_str(&format!(" visual={:?}", state.visual));
        }
        for (flag, set) in [
            ("busy", state.busy),
            ("disabled", state.disabled),
            ("aria-disabled", state.aria_disabled),
            ("hovered", state.hovered),
            ("flash", state.flashed),
        ] {
            if set {
                line.push(' ');
                line.push_str(flag);
            }
        }
        Some(line)
    }
}

fn mount_kind(
    cx: &mut WidgetContext,
    kind: WidgetKind,
    config: &DemoConfig,
    log: &CallbackLog,
    clock: &Rc<Cell<u64>>,
) -> WidgetId {
    let overrides = &config.widgets;
    let label = overrides
        .label_for(kind)
        .unwrap_or(kind.default_label())
        .to_string();

    let on_click = {
        let log = log.clone();
        let clock = clock.clone();
        move |_: &ClickEvent| {
            info!(%kind, at = clock.get(), "onClick");
            log.borrow_mut().push(CallbackRecord {
                kind,
                at: clock.get(),
                confirm: false,
            });
        }
    };

    match kind {
        WidgetKind::Anxious => anxious().label(label).on_click(on_click).mount(cx),
        WidgetKind::PassiveAggressive => {
            passive_aggressive().label(label).on_click(on_click).mount(cx)
        }
        WidgetKind::EmotionallyUnavailable => {
            emotionally_unavailable().label(label).on_click(on_click).mount(cx)
        }
        WidgetKind::OverlyEager => overly_eager().label(label).on_click(on_click).mount(cx),
        WidgetKind::PeoplePleasing => {
            let log = log.clone();
            let clock = clock.clone();
            people_pleasing()
                .label(label)
                .on_click(on_click)
                .on_confirm(move || {
                    info!(%kind, at = clock.get(), "onConfirm");
                    log.borrow_mut().push(CallbackRecord {
                        kind,
                        at: clock.get(),
                        confirm: true,
                    });
                })
                .mount(cx)
        }
        WidgetKind::Dissociating => {
            let mut builder = dissociating().label(label).on_click(on_click);
            if let Some(chance) = overrides.forget_chance {
                builder = builder.forget_chance(chance);
            }
            builder.mount(cx)
        }
        WidgetKind::Gaslighting => {
            let mut builder = gaslighting().label(label).on_click(on_click);
            if let Some(alternate) = &overrides.gaslight_label {
                builder = builder.alternate_label(alternate.clone());
            }
            builder.mount(cx)
        }
        WidgetKind::Overthinking => overthinking().label(label).on_click(on_click).mount(cx),
        WidgetKind::ImposterSyndrome => {
            imposter_syndrome().label(label).on_click(on_click).mount(cx)
        }
        WidgetKind::IdentityCrisis => {
            let mut builder = identity_crisis().label(label).on_click(on_click);
            if let Some(duration) = overrides.cycle_duration_ms {
                builder = builder.cycle_duration(duration);
            }
            builder.mount(cx)
        }
    }
}
