//! # Identity Entities
//!
//! The fixed, well-known parameters of the add-on's service account and the
//! values exchanged with the host account directory.

use std::path::PathBuf;

use shared_types::UserId;

/// Handle of the service account.
pub const BOT_USERNAME: &str = "matterpoll";

/// Display name of the service account.
pub const BOT_DISPLAY_NAME: &str = "Matterpoll";

/// Profile image, relative to the deployed bundle root.
pub const PROFILE_IMAGE_PATH: &str = "assets/logo_dark.png";

/// Description shown in account directories, localized per server.
pub const BOT_DESCRIPTION: Message = Message {
    id: "bot.description",
    default: "Poll Bot",
};

/// A localizable message with its fallback text baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    /// Catalog key.
    pub id: &'static str,
    /// Text used when no translation exists.
    pub default: &'static str,
}

/// Configurable identity of the service account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotProfile {
    /// Account handle.
    pub username: String,
    /// Account display name.
    pub display_name: String,
    /// Avatar asset path relative to the bundle root.
    pub profile_image_path: PathBuf,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            username: BOT_USERNAME.to_string(),
            display_name: BOT_DISPLAY_NAME.to_string(),
            profile_image_path: PathBuf::from(PROFILE_IMAGE_PATH),
        }
    }
}

impl BotProfile {
    /// The creation request for this profile.
    #[must_use]
    pub fn definition(&self) -> BotDefinition {
        BotDefinition {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Bot creation request sent to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotDefinition {
    /// Account handle.
    pub username: String,
    /// Account display name.
    pub display_name: String,
}

/// Partial metadata update of a bot account. `None` fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BotPatch {
    /// New display name.
    pub display_name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// The add-on's bot account, resolved once per activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    /// Host ID of the bot account.
    pub bot_user_id: UserId,
}

impl ServiceIdentity {
    /// Wrap a resolved bot account ID.
    pub fn new(bot_user_id: UserId) -> Self {
        Self { bot_user_id }
    }
}
