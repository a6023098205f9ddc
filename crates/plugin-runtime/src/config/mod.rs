//! # Configuration
//!
//! Two layers, both immutable snapshots once installed:
//!
//! - [`PluginConfig`]: deployment parameters fixed for the process lifetime
//!   (manifest version, minimum host version, bot identity).
//! - [`PluginSettings`]: operator settings the host pushes as JSON and may
//!   change at any time.

pub mod plugin;
pub mod settings;

pub use plugin::{ConfigError, ManifestConfig, PluginConfig, PLUGIN_ID};
pub use settings::{PluginSettings, SettingsError, SettingsStore, DEFAULT_TRIGGER};
