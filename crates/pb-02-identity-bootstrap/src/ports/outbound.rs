//! # Outbound Ports
//!
//! Traits for the host collaborators the bootstrapper drives. All calls are
//! blocking and carry no timeout; the host bounds activation as a whole.

use std::path::Path;

use shared_types::{HostError, UserId};

use crate::domain::{BotDefinition, BotPatch, Message};

/// Host account directory - outbound port.
pub trait AccountDirectory: Send + Sync {
    /// Create the bot if it does not exist and return its account ID.
    ///
    /// Must be idempotent: calling it for an existing bot returns the
    /// existing ID.
    fn ensure_bot(&self, bot: &BotDefinition) -> Result<UserId, HostError>;

    /// Apply a metadata patch to a bot account.
    fn patch_bot(&self, bot_user_id: &UserId, patch: &BotPatch) -> Result<(), HostError>;

    /// Replace an account's avatar with the given image bytes.
    fn set_profile_image(&self, user_id: &UserId, image: &[u8]) -> Result<(), HostError>;
}

/// Bundle-relative asset reader - outbound port.
pub trait AssetReader: Send + Sync {
    /// Read an asset shipped in the deployed bundle.
    fn read_asset(&self, relative_path: &Path) -> Result<Vec<u8>, HostError>;
}

/// Message localizer - outbound port.
pub trait Localizer: Send + Sync {
    /// Translate a message into `locale`, falling back to its default text.
    fn localize(&self, locale: &str, message: &Message) -> String;
}
