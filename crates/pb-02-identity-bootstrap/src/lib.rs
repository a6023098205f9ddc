//! # PB-02 Identity Bootstrap
//!
//! Brings the add-on's service account (bot) online on the host.
//!
//! **Component ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Steps
//!
//! Three strictly sequential steps, each producing or consuming the bot's
//! account ID:
//!
//! | Step | Port | Effect |
//! |------|------|--------|
//! | `ensure_account` | `AccountDirectory` | create bot if absent, idempotent |
//! | `patch_description` | `Localizer` + `AccountDirectory` | description in the server locale |
//! | `set_profile_image` | `AssetReader` + `AccountDirectory` | upload `assets/logo_dark.png` |
//!
//! The caller runs them in order and stops at the first failure. Earlier steps are NOT rolled back: a bot
//! created by `ensure_account` stays on the host if a later step fails, and
//! the next activation repeats all three steps.
//!
//! ## Module Structure
//!
//! ```text
//! pb-02-identity-bootstrap/
//! ├── domain/          # BotProfile, BotDefinition, ServiceIdentity, IdentityError
//! ├── ports/           # AccountDirectory, AssetReader, Localizer
//! ├── adapters/        # Filesystem bundle assets
//! └── service.rs       # IdentityBootstrapper
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::FsBundleAssets;
pub use domain::{
    BotDefinition, BotPatch, BotProfile, IdentityError, IdentityStep, Message, ServiceIdentity,
    BOT_DESCRIPTION, BOT_DISPLAY_NAME, BOT_USERNAME, PROFILE_IMAGE_PATH,
};
pub use ports::{AccountDirectory, AssetReader, Localizer};
pub use service::IdentityBootstrapper;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
