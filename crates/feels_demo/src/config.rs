//! Demo configuration file handling
//!
//! The demo reads an optional `feels.toml`:
//!
//! ```toml
//! mood = "extreme"
//! seed = 42
//!
//! [widgets]
//! forget_chance = 0.5
//! gaslight_label = "Erase"
//! cycle_duration_ms = 3000
//!
//! [widgets.labels]
//! anxious = "Send"
//! ```
//!
//! Command-line flags override whatever the file says.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use feels_core::kind::WidgetKind;
use feels_core::mood::MoodLevel;
use serde::{Deserialize, Serialize};

/// Top-level demo configuration
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Shared mood every widget starts with
    #[serde(default)]
    pub mood: MoodLevel,
    /// Seed for reproducible runs; thread entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub widgets: WidgetOverrides,
}

/// Per-widget options
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct WidgetOverrides {
    #[serde(default)]
    pub forget_chance: Option<f64>,
    #[serde(default)]
    pub gaslight_label: Option<String>,
    #[serde(default)]
    pub cycle_duration_ms: Option<u64>,
    /// Label per widget, keyed by kebab-case kind name
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl WidgetOverrides {
    /// Configured label for `kind`, if any
    pub fn label_for(&self, kind: WidgetKind) -> Option<&str> {
        self.labels.get(kind.name()).map(String::as_str)
    }
}

impl DemoConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(content).context("Failed to parse demo config")?;
        for name in config.widgets.labels.keys() {
            if WidgetKind::from_name(name).is_none() {
                tracing::warn!("label configured for unknown widget {:?}", name);
            }
        }
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize demo config")
    }
}
