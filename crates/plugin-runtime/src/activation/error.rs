//! Activation errors.

use pb_01_version_gate::VersionError;
use pb_02_identity_bootstrap::{IdentityError, IdentityStep};
use shared_types::HostError;
use thiserror::Error;

use super::stage::ActivationStage;

/// Error classes reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationErrorKind {
    /// Host version unparseable or too old.
    Version,
    /// Required host configuration missing.
    Configuration,
    /// Store or bundle construction failed.
    DependencyInit,
    /// Bot account ensure, patch or avatar failed.
    Identity,
    /// Activation raced another lifecycle transition.
    Lifecycle,
}

/// Activation failure. Fatal and never retried by the runtime.
#[derive(Debug, Clone, Error)]
pub enum ActivationError {
    /// Host version check failed.
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Host has no site URL.
    #[error("siteURL is not set. Please set a siteURL and restart the plugin")]
    MissingSiteUrl,

    /// Poll store could not be opened.
    #[error("failed to create store: {0}")]
    CreateStore(#[source] HostError),

    /// Translation bundle could not be loaded.
    #[error("failed to init localisation bundle: {0}")]
    InitBundle(#[source] HostError),

    /// Bot bootstrap failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Another activation is in progress.
    #[error("activation already in progress")]
    AlreadyActivating,

    /// The add-on was deactivated while this activation was running.
    #[error("activation superseded by deactivation")]
    Superseded,
}

impl ActivationError {
    /// Stage that failed, if the error came from a stage.
    #[must_use]
    pub fn stage(&self) -> Option<ActivationStage> {
        match self {
            Self::Version(_) => Some(ActivationStage::CheckServerVersion),
            Self::MissingSiteUrl => Some(ActivationStage::CheckSiteUrl),
            Self::CreateStore(_) => Some(ActivationStage::CreateStore),
            Self::InitBundle(_) => Some(ActivationStage::InitBundle),
            Self::Identity(e) => Some(match e.step() {
                IdentityStep::EnsureAccount => ActivationStage::EnsureBot,
                IdentityStep::PatchDescription => ActivationStage::PatchBotDescription,
                IdentityStep::SetProfileImage => ActivationStage::SetProfileImage,
            }),
            Self::Superseded => Some(ActivationStage::MarkActivated),
            Self::AlreadyActivating => None,
        }
    }

    /// Error class.
    #[must_use]
    pub fn kind(&self) -> ActivationErrorKind {
        match self {
            Self::Version(_) => ActivationErrorKind::Version,
            Self::MissingSiteUrl => ActivationErrorKind::Configuration,
            Self::CreateStore(_) | Self::InitBundle(_) => ActivationErrorKind::DependencyInit,
            Self::Identity(_) => ActivationErrorKind::Identity,
            Self::AlreadyActivating | Self::Superseded => ActivationErrorKind::Lifecycle,
        }
    }
}
