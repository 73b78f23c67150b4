//! Widget kinds
//!
//! The closed set of widget behaviors the engine knows how to drive. Each
//! kind has its own mood parameter record (see [`crate::mood`]) and its own
//! defaults for the uniform prop contract.

use std::fmt;

/// Every widget behavior shipped by the library
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetKind {
    /// Trembles on hover and offers an uninvited tooltip
    Anxious,
    /// Works fine, answers with a sigh
    PassiveAggressive,
    /// Looks disabled and drifts away from the pointer
    EmotionallyUnavailable,
    /// Pulses and begs as soon as the pointer gets near
    OverlyEager,
    /// Needs several confirmations before acting
    PeoplePleasing,
    /// Stares into space, then maybe acts
    Dissociating,
    /// Flashes a scary label, then denies it
    Gaslighting,
    /// Cycles anxious thoughts while hovered
    Overthinking,
    /// Acts, then apologizes for it
    ImposterSyndrome,
    /// Morphs through design eras while hovered
    IdentityCrisis,
}

impl WidgetKind {
    /// All kinds, in catalogue order
    pub const ALL: [WidgetKind; 10] = [
        WidgetKind::Anxious,
        WidgetKind::PassiveAggressive,
        WidgetKind::EmotionallyUnavailable,
        WidgetKind::OverlyEager,
        WidgetKind::PeoplePleasing,
        WidgetKind::Dissociating,
        WidgetKind::Gaslighting,
        WidgetKind::Overthinking,
        WidgetKind::ImposterSyndrome,
        WidgetKind::IdentityCrisis,
    ];

    /// Stable kebab-case identifier
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Anxious => "anxious",
            WidgetKind::PassiveAggressive => "passive-aggressive",
            WidgetKind::EmotionallyUnavailable => "emotionally-unavailable",
            WidgetKind::OverlyEager => "overly-eager",
            WidgetKind::PeoplePleasing => "people-pleasing",
            WidgetKind::Dissociating => "dissociating",
            WidgetKind::Gaslighting => "gaslighting",
            WidgetKind::Overthinking => "overthinking",
            WidgetKind::ImposterSyndrome => "imposter-syndrome",
            WidgetKind::IdentityCrisis => "identity-crisis",
        }
    }

    /// Look a kind up by its kebab-case identifier
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Human-readable title
    pub fn title(self) -> &'static str {
        match self {
            WidgetKind::Anxious => "Anxious",
            WidgetKind::PassiveAggressive => "Passive-Aggressive",
            WidgetKind::EmotionallyUnavailable => "Emotionally Unavailable",
            WidgetKind::OverlyEager => "Overly Eager",
            WidgetKind::PeoplePleasing => "People Pleasing",
            WidgetKind::Dissociating => "Dissociating",
            WidgetKind::Gaslighting => "Gaslighting",
            WidgetKind::Overthinking => "Overthinking",
            WidgetKind::ImposterSyndrome => "Imposter Syndrome",
            WidgetKind::IdentityCrisis => "Identity Crisis",
        }
    }

    /// One-line description for catalogue listings
    pub fn description(self) -> &'static str {
        match self {
            WidgetKind::Anxious => "Trembles when you look at it. Offers unsolicited reassurance.",
            WidgetKind::PassiveAggressive => {
                "Works perfectly fine. The contempt is in the subtext."
            }
            WidgetKind::EmotionallyUnavailable => {
                "Says it's disabled. Moves away when you get close. It's complicated."
            }
            WidgetKind::OverlyEager => "Gets excited the moment you come near.",
            WidgetKind::PeoplePleasing => "Wants to be really sure you're sure.",
            WidgetKind::Dissociating => "Takes a while. Might forget what it was doing.",
            WidgetKind::Gaslighting => "It always said Save. You imagined the rest.",
            WidgetKind::Overthinking => "Considers every possibility while you hover.",
            WidgetKind::ImposterSyndrome => "Works perfectly, then apologizes.",
            WidgetKind::IdentityCrisis => "Who am I? What era is this?",
        }
    }

    /// Content shown when the caller supplies none
    pub fn default_label(self) -> &'static str {
        match self {
            WidgetKind::Anxious => "Submit",
            WidgetKind::PassiveAggressive => "Click",
            WidgetKind::EmotionallyUnavailable => "Connect",
            WidgetKind::OverlyEager => "Click",
            WidgetKind::PeoplePleasing => "Confirm",
            WidgetKind::Dissociating => "Process",
            WidgetKind::Gaslighting => "Save",
            WidgetKind::Overthinking => "Decide",
            WidgetKind::ImposterSyndrome => "Save",
            WidgetKind::IdentityCrisis => "Click Me",
        }
    }

    /// Accessible label used when the content is not plain text
    pub fn fallback_accessible_label(self) -> String {
        format!("{} button", self.title())
    }

    /// Whether the presentation animates this widget through the motion layer.
    ///
    /// Motion-driven widgets must not receive the motion layer's reserved
    /// handler attributes.
    pub fn uses_motion_layer(self) -> bool {
        !matches!(self, WidgetKind::PassiveAggressive)
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_lookup() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(WidgetKind::from_name("stoic"), None);
    }

    #[test]
    fn test_fallback_accessible_label() {
        assert_eq!(
            WidgetKind::Gaslighting.fallback_accessible_label(),
            "Gaslighting button"
        );
    }

    #[test]
    fn test_only_plain_button_skips_motion_layer() {
        let plain: Vec<_> = WidgetKind::ALL
            .into_iter()
            .filter(|k| !k.uses_motion_layer())
            .collect();
        assert_eq!(plain, vec![WidgetKind::PassiveAggressive]);
    }
}
