//! # Domain Errors
//!
//! Error types for the identity bootstrapper. Every variant names the step
//! that failed so activation can report it.

use std::path::PathBuf;

use shared_types::HostError;
use thiserror::Error;

/// Bootstrap steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityStep {
    /// Create or look up the bot account.
    EnsureAccount,
    /// Apply the localized description.
    PatchDescription,
    /// Upload the avatar.
    SetProfileImage,
}

/// Identity bootstrap errors.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// Host refused to create or find the bot account.
    #[error("failed to ensure bot user: {0}")]
    EnsureAccount(#[source] HostError),

    /// Host refused the description patch.
    #[error("failed to patch bot description: {0}")]
    PatchDescription(#[source] HostError),

    /// The avatar asset could not be located or read.
    #[error("failed to set profile image: cannot read {path:?}: {source}")]
    ReadProfileImage {
        /// Relative asset path that was requested.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: HostError,
    },

    /// Host refused the avatar upload.
    #[error("failed to set profile image: {0}")]
    SetProfileImage(#[source] HostError),
}

impl IdentityError {
    /// The step that produced this error.
    #[must_use]
    pub fn step(&self) -> IdentityStep {
        match self {
            Self::EnsureAccount(_) => IdentityStep::EnsureAccount,
            Self::PatchDescription(_) => IdentityStep::PatchDescription,
            Self::ReadProfileImage { .. } | Self::SetProfileImage(_) => {
                IdentityStep::SetProfileImage
            }
        }
    }
}
