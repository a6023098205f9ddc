//! # Plugin Settings
//!
//! Operator-facing settings delivered by the host as JSON. Readers get an
//! `Arc` snapshot, so a concurrent change never tears a request's view.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Slash-command trigger used when none is configured.
pub const DEFAULT_TRIGGER: &str = "poll";

/// Operator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Slash-command trigger word, without the leading `/`.
    #[serde(rename = "Trigger", default = "default_trigger")]
    pub trigger: String,

    /// Enable the experimental interactive UI.
    #[serde(rename = "ExperimentalUI", default)]
    pub experimental_ui: bool,
}

fn default_trigger() -> String {
    DEFAULT_TRIGGER.to_string()
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            experimental_ui: false,
        }
    }
}

impl PluginSettings {
    /// Parse settings from the host's JSON payload.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(raw).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the trigger is a single bare word.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let trigger = &self.trigger;
        if trigger.is_empty()
            || trigger.starts_with('/')
            || trigger.chars().any(char::is_whitespace)
        {
            return Err(SettingsError::InvalidTrigger(trigger.clone()));
        }
        Ok(())
    }
}

/// Settings errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Payload is not valid settings JSON.
    #[error("failed to parse plugin settings: {0}")]
    Parse(#[source] serde_json::Error),

    /// Trigger is empty, has a leading slash, or contains whitespace.
    #[error("invalid trigger {0:?}: must be a single word without a leading slash")]
    InvalidTrigger(String),
}

/// Holder of the current settings snapshot.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<Arc<PluginSettings>>,
}

impl SettingsStore {
    /// Create a store holding `settings`.
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<PluginSettings> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot. Invalid settings leave the current ones in place.
    pub fn set(&self, settings: PluginSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        info!(
            trigger = %settings.trigger,
            experimental_ui = settings.experimental_ui,
            "Plugin settings updated"
        );
        *self.current.write() = Arc::new(settings);
        Ok(())
    }

    /// Parse and install settings from JSON.
    pub fn apply_json(&self, raw: &str) -> Result<(), SettingsError> {
        self.set(PluginSettings::from_json(raw)?)
    }
}
