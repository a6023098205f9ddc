//! # Plugin Configuration
//!
//! Deployment parameters of the add-on.
//!
//! ## Environment Overrides
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PB_PLUGIN_VERSION` | crate version |
//! | `PB_MIN_SERVER_VERSION` | `5.10.0` |
//! | `PB_BOT_USERNAME` | `matterpoll` |
//! | `PB_BOT_DISPLAY_NAME` | `Matterpoll` |
//! | `PB_PROFILE_IMAGE` | `assets/logo_dark.png` |

use std::path::PathBuf;

use pb_01_version_gate::{MinimumVersion, VersionError, VersionGate, MINIMUM_SERVER_VERSION};
use pb_02_identity_bootstrap::BotProfile;
use thiserror::Error;

/// Manifest ID of the add-on.
pub const PLUGIN_ID: &str = "com.github.matterpoll.matterpoll";

/// Complete plugin configuration.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Manifest identity.
    pub manifest: ManifestConfig,
    /// Inclusive lower bound on the host version.
    pub minimum_server_version: String,
    /// Service account identity.
    pub bot: BotProfile,
}

/// Manifest identity of the deployed bundle.
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    /// Plugin ID.
    pub id: String,
    /// Plugin version; namespaces the poll store.
    pub version: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            id: PLUGIN_ID.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            manifest: ManifestConfig::default(),
            minimum_server_version: MINIMUM_SERVER_VERSION.to_string(),
            bot: BotProfile::default(),
        }
    }
}

impl PluginConfig {
    /// Load defaults, then apply `PB_*` environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(version) = std::env::var("PB_PLUGIN_VERSION") {
            config.manifest.version = version;
        }
        if let Ok(minimum) = std::env::var("PB_MIN_SERVER_VERSION") {
            config.minimum_server_version = minimum;
        }
        if let Ok(username) = std::env::var("PB_BOT_USERNAME") {
            config.bot.username = username;
        }
        if let Ok(display_name) = std::env::var("PB_BOT_DISPLAY_NAME") {
            config.bot.display_name = display_name;
        }
        if let Ok(path) = std::env::var("PB_PROFILE_IMAGE") {
            config.bot.profile_image_path = PathBuf::from(path);
        }

        config
    }

    /// Validate the configuration before any host call is made.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the manifest version is empty (it namespaces the store)
    /// - the bot username is empty
    /// - the minimum host version is not a semantic version
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.manifest.version.trim().is_empty() {
            return Err(ConfigError::EmptyManifestVersion);
        }
        if self.bot.username.trim().is_empty() {
            return Err(ConfigError::EmptyBotUsername);
        }
        self.version_gate().map(|_| ())
    }

    /// Build the version gate for the configured minimum.
    pub fn version_gate(&self) -> Result<VersionGate, ConfigError> {
        MinimumVersion::parse(&self.minimum_server_version)
            .map(VersionGate::new)
            .map_err(ConfigError::InvalidMinimumVersion)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Manifest version is empty.
    #[error("manifest version must not be empty")]
    EmptyManifestVersion,

    /// Bot username is empty.
    #[error("bot username must not be empty")]
    EmptyBotUsername,

    /// Minimum host version does not parse.
    #[error("invalid minimum server version: {0}")]
    InvalidMinimumVersion(#[source] VersionError),
}
