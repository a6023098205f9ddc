//! Named activation stages.

use std::fmt;

/// One step of the activation sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivationStage {
    /// Host version is at least the minimum.
    CheckServerVersion = 1,
    /// Host site URL is configured.
    CheckSiteUrl = 2,
    /// Poll store opened, namespaced by plugin version.
    CreateStore = 3,
    /// Translation bundle loaded.
    InitBundle = 4,
    /// Bot account created or found.
    EnsureBot = 5,
    /// Bot description patched in the server locale.
    PatchBotDescription = 6,
    /// Bot avatar uploaded.
    SetProfileImage = 7,
    /// HTTP routes built.
    InitApi = 8,
    /// Components committed and the add-on marked active.
    MarkActivated = 9,
}

impl ActivationStage {
    /// Every stage, in execution order.
    pub const ORDER: [ActivationStage; 9] = [
        Self::CheckServerVersion,
        Self::CheckSiteUrl,
        Self::CreateStore,
        Self::InitBundle,
        Self::EnsureBot,
        Self::PatchBotDescription,
        Self::SetProfileImage,
        Self::InitApi,
        Self::MarkActivated,
    ];

    /// Stable label, used in logs and as a metric label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckServerVersion => "check_server_version",
            Self::CheckSiteUrl => "check_site_url",
            Self::CreateStore => "create_store",
            Self::InitBundle => "init_bundle",
            Self::EnsureBot => "ensure_bot",
            Self::PatchBotDescription => "patch_bot_description",
            Self::SetProfileImage => "set_profile_image",
            Self::InitApi => "init_api",
            Self::MarkActivated => "mark_activated",
        }
    }

    /// 1-based position in the sequence.
    #[must_use]
    pub fn position(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ActivationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
