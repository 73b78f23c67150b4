//! Identity crisis button
//!
//! While hovered it morphs through six design eras on a loop, each getting
//! an equal share of the (mood-scaled) cycle. Leaving snaps it back to its
//! default look as if nothing happened.

use std::any::Any;
use std::fmt;

use feels_core::callback::{CallbackResult, ClickCallback};
use feels_core::mood::{timing, IdentityCrisisParams};
use feels_core::prelude::*;
use tracing::trace;

use crate::context::WidgetContext;
use crate::cycle::Rotation;
use crate::widget::{Content, DisplayState, Machine, Visual, WidgetBuilder, WidgetProps};

/// A design era the button can dress up as
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Era {
    #[default]
    Default,
    Skeuomorphic,
    Flat,
    Material,
    Glassmorphism,
    Brutalist,
    Web2,
}

/// Descriptive styling for one era
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EraStyle {
    pub background: &'static str,
    pub foreground: &'static str,
    pub border: &'static str,
    pub corner_radius: f32,
    pub shadow: &'static str,
    pub font_weight: u16,
    pub letter_spacing: f32,
    pub uppercase: bool,
    pub monospace: bool,
    /// Translucent eras need something colorful behind them
    pub needs_backdrop: bool,
}

impl Era {
    /// The hover cycle, in order
    pub const CYCLE: [Era; 6] = [
        Era::Skeuomorphic,
        Era::Flat,
        Era::Material,
        Era::Glassmorphism,
        Era::Brutalist,
        Era::Web2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Era::Default => "Default",
            Era::Skeuomorphic => "Skeuomorphic",
            Era::Flat => "Flat",
            Era::Material => "Material",
            Era::Glassmorphism => "Glassmorphism",
            Era::Brutalist => "Brutalist",
            Era::Web2 => "Web 2.0",
        }
    }

    pub fn style(self) -> EraStyle {
        let base = EraStyle {
            background: "#6366f1",
            foreground: "#fff",
            border: "1px solid #4f46e5",
            corner_radius: 8.0,
            shadow: "0 1px 3px rgba(0,0,0,0.1)",
            font_weight: 500,
            letter_spacing: 0.0,
            uppercase: false,
            monospace: false,
            needs_backdrop: false,
        };
        match self {
            Era::Default => base,
            Era::Skeuomorphic => EraStyle {
                background: concat!(
                    "linear-gradient(to bottom, ",
                    "#e8e8e8 0%, #c8c8c8 50%, #b0b0b0 51%, #c0c0c0 100%)"
                ),
                foreground: "#333",
                border: "1px solid #888",
                corner_radius: 6.0,
                shadow: "inset 0 1px 0 rgba(255,255,255,0.6), 0 2px 4px rgba(0,0,0,0.3)",
                font_weight: 700,
                ..base
            },
            Era::Flat => EraStyle {
                background: "#3498db",
                border: "none",
                corner_radius: 0.0,
                shadow: "none",
                font_weight: 600,
                ..base
            },
            Era::Material => EraStyle {
                background: "#6200ee",
                border: "none",
                corner_radius: 4.0,
                shadow: "0 2px 4px rgba(0,0,0,0.2), 0 4px 8px rgba(0,0,0,0.15)",
                letter_spacing: 1.0,
                uppercase: true,
                ..base
            },
            Era::Glassmorphism => EraStyle {
                background: "rgba(255,255,255,0.15)",
                border: "1px solid rgba(255,255,255,0.3)",
                corner_radius: 12.0,
                shadow: "0 8px 32px rgba(0,0,0,0.1)",
                needs_backdrop: true,
                ..base
            },
            Era::Brutalist => EraStyle {
                background: "#ffff00",
                foreground: "#000",
                border: "3px solid #000",
                corner_radius: 0.0,
                shadow: "4px 4px 0 #000",
                font_weight: 700,
                letter_spacing: 1.0,
                uppercase: true,
                monospace: true,
                ..base
            },
            Era::Web2 => EraStyle {
                background: "linear-gradient(to bottom, #69b3ff 0%, #2b7de9 100%)",
                border: "1px solid #1a5fb4",
                corner_radius: 999.0,
                shadow: "0 1px 0 rgba(255,255,255,0.3) inset, 0 2px 4px rgba(0,0,0,0.2)",
                font_weight: 700,
                ..base
            },
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity crisis configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdentityCrisisConfig {
    /// Time for one full pass through every era at Normal mood
    pub cycle_duration_ms: u64,
}

impl Default for IdentityCrisisConfig {
    fn default() -> Self {
        Self {
            cycle_duration_ms: timing::DEFAULT_CYCLE_DURATION_MS,
        }
    }
}

/// Identity crisis interaction state
#[derive(Debug)]
pub struct IdentityCrisisMachine {
    config: IdentityCrisisConfig,
    rotation: Rotation,
    on_click: ClickCallback,
}

impl IdentityCrisisMachine {
    pub fn new(config: IdentityCrisisConfig, on_click: ClickCallback) -> Self {
        Self {
            config,
            rotation: Rotation::default(),
            on_click,
        }
    }

    /// Era currently worn
    pub fn era(&self) -> Era {
        self.rotation
            .current()
            .map_or(Era::Default, |index| Era::CYCLE[index % Era::CYCLE.len()])
    }
}

impl Machine for IdentityCrisisMachine {
    fn kind(&self) -> WidgetKind {
        WidgetKind::IdentityCrisis
    }

    fn pointer_enter(&mut self, cx: &mut MachineCx<'_>) {
        let period = IdentityCrisisParams::resolve(cx.mood())
            .era_period_ms(self.config.cycle_duration_ms, Era::CYCLE.len());
        self.rotation.start(cx, Era::CYCLE.len(), period);
        trace!(owner = ?cx.owner(), period, "identity-crisis: who am I");
    }

    fn pointer_leave(&mut self, cx: &mut MachineCx<'_>) {
        self.rotation.stop(cx);
    }

    fn click(&mut self, _cx: &mut MachineCx<'_>, event: &ClickEvent) -> CallbackResult {
        self.on_click.call(event)
    }

    fn timer_fired(&mut self, cx: &mut MachineCx<'_>, fired: &FiredTimer) -> CallbackResult {
        if self.rotation.tick(fired) {
            trace!(owner = ?cx.owner(), era = %self.era(), "identity-crisis: new era");
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
        DisplayState::new(WidgetKind::IdentityCrisis, content.clone())
            .with_visual(Visual::Era(self.era()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Create an identity crisis button
pub fn identity_crisis() -> IdentityCrisisBuilder {
    IdentityCrisisBuilder {
        props: WidgetProps::default(),
        config: IdentityCrisisConfig::default(),
    }
}

/// Builder for identity crisis buttons
pub struct IdentityCrisisBuilder {
    props: WidgetProps,
    config: IdentityCrisisConfig,
}

impl IdentityCrisisBuilder {
    /// Full era cycle at Normal mood. Not validated.
    pub fn cycle_duration(mut self, duration_ms: u64) -> Self {
        self.config.cycle_duration_ms = duration_ms;
        self
    }
}

impl WidgetBuilder for IdentityCrisisBuilder {
    fn props_mut(&mut self) -> &mut WidgetProps {
        &mut self.props
    }

    fn mount(mut self, cx: &mut WidgetContext) -> WidgetId {
        let machine = IdentityCrisisMachine::new(self.config, self.props.take_on_click());
        cx.mount(machine, self.props)
    }
}
