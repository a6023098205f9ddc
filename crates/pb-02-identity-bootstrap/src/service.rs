//! # Identity Bootstrapper
//!
//! Application service exposing the three bootstrap steps. The activation
//! sequencer runs them as separate stages.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{BotPatch, BotProfile, IdentityError, ServiceIdentity, BOT_DESCRIPTION};
use crate::ports::{AccountDirectory, AssetReader, Localizer};

/// Ensures the service account exists, is described, and carries its avatar.
pub struct IdentityBootstrapper {
    accounts: Arc<dyn AccountDirectory>,
    assets: Arc<dyn AssetReader>,
    profile: BotProfile,
}

impl IdentityBootstrapper {
    /// Create a bootstrapper for the given bot profile.
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        assets: Arc<dyn AssetReader>,
        profile: BotProfile,
    ) -> Self {
        Self {
            accounts,
            assets,
            profile,
        }
    }

    /// The profile this bootstrapper installs.
    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    /// Step 1: create the bot if absent and resolve its account ID.
    #[instrument(skip(self), fields(username = %self.profile.username))]
    pub fn ensure_account(&self) -> Result<ServiceIdentity, IdentityError> {
        let bot_user_id = self
            .accounts
            .ensure_bot(&self.profile.definition())
            .map_err(IdentityError::EnsureAccount)?;

        info!(bot_user_id = %bot_user_id, "Bot account ensured");
        Ok(ServiceIdentity::new(bot_user_id))
    }

    /// Step 2: describe the bot in the server's own locale.
    ///
    /// The description is shown server-wide, so it never follows the locale
    /// of whoever triggered activation.
    #[instrument(skip(self, identity, localizer), fields(bot_user_id = %identity.bot_user_id))]
    pub fn patch_description(
        &self,
        identity: &ServiceIdentity,
        localizer: &dyn Localizer,
        server_locale: &str,
    ) -> Result<(), IdentityError> {
        let description = localizer.localize(server_locale, &BOT_DESCRIPTION);
        let patch = BotPatch {
            description: Some(description),
            ..BotPatch::default()
        };

        self.accounts
            .patch_bot(&identity.bot_user_id, &patch)
            .map_err(IdentityError::PatchDescription)?;

        info!(locale = server_locale, "Bot description patched");
        Ok(())
    }

    /// Step 3: upload the branded avatar from the bundle.
    #[instrument(skip(self, identity), fields(bot_user_id = %identity.bot_user_id))]
    pub fn set_profile_image(&self, identity: &ServiceIdentity) -> Result<(), IdentityError> {
        let path = &self.profile.profile_image_path;
        let image = self.assets.read_asset(path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "Profile image unavailable");
            IdentityError::ReadProfileImage {
                path: path.clone(),
                source,
            }
        })?;

        self.accounts
            .set_profile_image(&identity.bot_user_id, &image)
            .map_err(IdentityError::SetProfileImage)?;

        info!(bytes = image.len(), "Bot profile image set");
        Ok(())
    }
}
