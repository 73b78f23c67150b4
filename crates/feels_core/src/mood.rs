//! Mood policy
//!
//! A pure mapping from the three-level [`MoodLevel`] to the numeric knobs each
//! widget kind runs on. Nothing here holds state: parameters are resolved at
//! the moment a machine needs them, so a mood change takes effect on the next
//! interaction.
//!
//! # Example
//!
//! ```rust
//! use feels_core::mood::{DissociatingParams, MoodLevel};
//!
//! let params = DissociatingParams::resolve(MoodLevel::Extreme);
//! // Extreme always dominates the caller's forget chance
//! assert_eq!(params.forget_chance(0.1), 0.6);
//!
//! // Unknown mood strings fall back to Normal
//! let mood: MoodLevel = "furious".parse().unwrap();
//! assert_eq!(mood, MoodLevel::Normal);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::kind::WidgetKind;

// ============================================================================
// Timing constants
// ============================================================================

/// Fixed timing and probability constants shared by the machines
pub mod timing {
    /// How long the click flash stays lit
    pub const CLICK_FLASH_MS: u64 = 220;
    /// Lower bound of the dissociation delay before mood scaling
    pub const DISSOCIATE_MIN_DELAY_MS: f64 = 3000.0;
    /// Width of the dissociation delay range before mood scaling
    pub const DISSOCIATE_DELAY_SPREAD_MS: f64 = 2000.0;
    /// How long the forgot label lingers before returning to idle
    pub const FORGOT_RESET_MS: u64 = 2000;
    /// How long the denial tooltip stays up
    pub const DENIAL_MS: u64 = 2000;
    /// How long the apology stays up
    pub const APOLOGY_MS: u64 = 2500;
    /// Forget chance used when the caller supplies none
    pub const DEFAULT_FORGET_CHANCE: f64 = 0.3;
    /// Forget chance forced at Extreme mood
    pub const EXTREME_FORGET_CHANCE: f64 = 0.6;
    /// Full era cycle duration used when the caller supplies none
    pub const DEFAULT_CYCLE_DURATION_MS: u64 = 6000;
}

// ============================================================================
// Mood level
// ============================================================================

/// Intensity preset scaling every widget's timing and probability parameters
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MoodLevel {
    /// Toned-down behaviors
    Subtle,
    /// Default experience
    #[default]
    Normal,
    /// Over-the-top behaviors
    Extreme,
}

impl MoodLevel {
    /// All levels, least to most intense
    pub const ALL: [MoodLevel; 3] = [MoodLevel::Subtle, MoodLevel::Normal, MoodLevel::Extreme];

    /// Lowercase identifier
    pub fn as_str(self) -> &'static str {
        match self {
            MoodLevel::Subtle => "subtle",
            MoodLevel::Normal => "normal",
            MoodLevel::Extreme => "extreme",
        }
    }

    /// Parse a mood, falling back to [`MoodLevel::Normal`] for anything unrecognized
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "subtle" => MoodLevel::Subtle,
            "normal" => MoodLevel::Normal,
            "extreme" => MoodLevel::Extreme,
            other => {
                tracing::warn!("unrecognized mood {:?}, falling back to normal", other);
                MoodLevel::Normal
            }
        }
    }

    /// Pick one of three values by intensity
    fn pick<T>(self, subtle: T, normal: T, extreme: T) -> T {
        match self {
            MoodLevel::Subtle => subtle,
            MoodLevel::Normal => normal,
            MoodLevel::Extreme => extreme,
        }
    }
}

impl FromStr for MoodLevel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lossy(s))
    }
}

impl From<String> for MoodLevel {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl From<&str> for MoodLevel {
    fn from(value: &str) -> Self {
        Self::parse_lossy(value)
    }
}

impl fmt::Display for MoodLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Per-kind parameter records
// ============================================================================

/// Horizontal tremble keyframes plus optional rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakePattern {
    /// Horizontal offsets, one per keyframe
    pub offsets: &'static [f32],
    /// Rotation in degrees, one per keyframe
    pub rotation: Option<&'static [f32]>,
    /// Duration of one repetition
    pub period_ms: u64,
}

impl ShakePattern {
    /// Largest horizontal displacement in the pattern
    pub fn amplitude(&self) -> f32 {
        self.offsets.iter().fold(0.0, |max, x| max.max(x.abs()))
    }
}

/// Anxious: tremble on hover
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnxiousParams {
    pub shake: ShakePattern,
}

impl AnxiousParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        let shake = mood.pick(
            ShakePattern {
                offsets: &[0.0, -1.0, 1.0, -1.0, 0.0],
                rotation: None,
                period_ms: 500,
            },
            ShakePattern {
                offsets: &[0.0, -2.0, 2.0, -2.0, 2.0, 0.0],
                rotation: None,
                period_ms: 500,
            },
            ShakePattern {
                offsets: &[0.0, -4.0, 4.0, -4.0, 4.0, -2.0, 2.0, 0.0],
                rotation: Some(&[0.0, -1.0, 1.0, -1.0, 1.0, 0.0]),
                period_ms: 300,
            },
        );
        Self { shake }
    }
}

/// Visual register of the passive-aggressive reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Faded grey
    Muted,
    /// Ordinary grey
    Plain,
    /// Pale and italic
    Cold,
}

/// PassiveAggressive: reply window and tone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassiveAggressiveParams {
    pub message_ms: u64,
    pub tone: Tone,
}

impl PassiveAggressiveParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            message_ms: mood.pick(900, 1500, 2400),
            tone: mood.pick(Tone::Muted, Tone::Plain, Tone::Cold),
        }
    }
}

/// EmotionallyUnavailable: how far it drifts from the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnavailableParams {
    pub avoid_distance: f32,
}

impl UnavailableParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            avoid_distance: mood.pick(4.0, 8.0, 16.0),
        }
    }
}

/// OverlyEager: pulse size and speed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EagerParams {
    pub pulse_scale: f32,
    pub pulse_period_ms: u64,
}

impl EagerParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            pulse_scale: mood.pick(1.05, 1.12, 1.25),
            pulse_period_ms: mood.pick(600, 600, 350),
        }
    }
}

static CONFIRMATION_STAGES: [&str; 6] = [
    "Are you sure?",
    "Really sure?",
    "It's okay if not",
    "Only if you want to",
    "I don't want to be a burden",
    "Last chance to back out...",
];

/// PeoplePleasing: the confirmation prompts, one per stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PleasingParams {
    pub stages: &'static [&'static str],
}

impl PleasingParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            stages: mood.pick(
                &CONFIRMATION_STAGES[..2],
                &CONFIRMATION_STAGES[..4],
                &CONFIRMATION_STAGES[..],
            ),
        }
    }

    /// Number of confirmation stages before the action fires
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// Dissociating: delay scaling and forget probability
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DissociatingParams {
    pub delay_multiplier: f64,
    /// When set, replaces whatever forget chance the caller asked for
    pub forced_forget_chance: Option<f64>,
}

impl DissociatingParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            delay_multiplier: mood.pick(0.5, 1.0, 1.5),
            forced_forget_chance: mood.pick(None, None, Some(timing::EXTREME_FORGET_CHANCE)),
        }
    }

    /// Effective forget probability given the caller's request
    pub fn forget_chance(&self, requested: f64) -> f64 {
        self.forced_forget_chance.unwrap_or(requested)
    }

    /// Delay for a uniform draw `unit` in `[0, 1)`; the upper bound is
    /// exclusive
    pub fn delay_ms(&self, unit: f64) -> u64 {
        let base = timing::DISSOCIATE_MIN_DELAY_MS + unit * timing::DISSOCIATE_DELAY_SPREAD_MS;
        let upper = (timing::DISSOCIATE_MIN_DELAY_MS + timing::DISSOCIATE_DELAY_SPREAD_MS)
            * self.delay_multiplier;
        let delay = (base * self.delay_multiplier).floor() as u64;
        delay.min((upper.ceil() as u64).saturating_sub(1))
    }
}

/// Gaslighting: how long the wrong label shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaslightingParams {
    pub flash_ms: u64,
}

impl GaslightingParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            flash_ms: mood.pick(300, 500, 800),
        }
    }
}

static THOUGHTS: [&str; 6] = [
    "Considering all possibilities...",
    "But what if...",
    "Have I thought of everything?",
    "What if I'm wrong?",
    "Let me reconsider...",
    "Actually, never mind. Or should I?",
];

/// Overthinking: the thoughts and how fast they cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverthinkingParams {
    pub thoughts: &'static [&'static str],
    pub period_ms: u64,
}

impl OverthinkingParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            thoughts: mood.pick(&THOUGHTS[..2], &THOUGHTS[..3], &THOUGHTS[..]),
            period_ms: mood.pick(1200, 1200, 800),
        }
    }
}

/// ImposterSyndrome: what it says after acting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImposterParams {
    pub apology: &'static str,
}

impl ImposterParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            apology: mood.pick(
                "Hope that was okay.",
                "Sorry if that was wrong.",
                "I'm so sorry if that was wrong. I shouldn't even be a button.",
            ),
        }
    }
}

/// IdentityCrisis: how the full era cycle is stretched
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdentityCrisisParams {
    pub cycle_multiplier: f64,
}

impl IdentityCrisisParams {
    pub fn resolve(mood: MoodLevel) -> Self {
        Self {
            cycle_multiplier: mood.pick(1.35, 1.0, 0.55),
        }
    }

    /// Time each era stays up; every era gets an equal share of the cycle
    pub fn era_period_ms(&self, cycle_duration_ms: u64, era_count: usize) -> u64 {
        let cycle = cycle_duration_ms as f64 * self.cycle_multiplier;
        let period = (cycle / era_count.max(1) as f64).round() as u64;
        period.max(1)
    }
}

// ============================================================================
// Kind-level resolution
// ============================================================================

/// Resolved parameters for any widget kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoodParameters {
    Anxious(AnxiousParams),
    PassiveAggressive(PassiveAggressiveParams),
    EmotionallyUnavailable(UnavailableParams),
    OverlyEager(EagerParams),
    PeoplePleasing(PleasingParams),
    Dissociating(DissociatingParams),
    Gaslighting(GaslightingParams),
    Overthinking(OverthinkingParams),
    ImposterSyndrome(ImposterParams),
    IdentityCrisis(IdentityCrisisParams),
}

/// Resolve the parameter record for `kind` at `mood`
pub fn resolve(kind: WidgetKind, mood: MoodLevel) -> MoodParameters {
    match kind {
        WidgetKind::Anxious => MoodParameters::Anxious(AnxiousParams::resolve(mood)),
        WidgetKind::PassiveAggressive => {
            MoodParameters::PassiveAggressive(PassiveAggressiveParams::resolve(mood))
        }
        WidgetKind::EmotionallyUnavailable => {
            MoodParameters::EmotionallyUnavailable(UnavailableParams::resolve(mood))
        }
        WidgetKind::OverlyEager => MoodParameters::OverlyEager(EagerParams::resolve(mood)),
        WidgetKind::PeoplePleasing => MoodParameters::PeoplePleasing(PleasingParams::resolve(mood)),
        WidgetKind::Dissociating => {
            MoodParameters::Dissociating(DissociatingParams::resolve(mood))
        }
        WidgetKind::Gaslighting => MoodParameters::Gaslighting(GaslightingParams::resolve(mood)),
        WidgetKind::Overthinking => {
            MoodParameters::Overthinking(OverthinkingParams::resolve(mood))
        }
        WidgetKind::ImposterSyndrome => {
            MoodParameters::ImposterSyndrome(ImposterParams::resolve(mood))
        }
        WidgetKind::IdentityCrisis => {
            MoodParameters::IdentityCrisis(IdentityCrisisParams::resolve(mood))
        }
    }
}
