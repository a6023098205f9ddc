//! # Domain Errors
//!
//! Error types for the version gate.

use thiserror::Error;

/// Coarse classification of a [`VersionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionErrorKind {
    /// The version string is not a semantic version.
    Unparseable,
    /// The version parsed but is older than the minimum.
    BelowMinimum,
}

/// Version gate errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Host reported something that is not a semantic version.
    #[error("failed to parse server version {version:?}: {reason}")]
    Unparseable {
        /// Raw string as reported.
        version: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Host is older than the supported minimum.
    #[error("this plugin requires Mattermost v{minimum} or later (found v{found})")]
    BelowMinimum {
        /// Host version.
        found: String,
        /// Configured lower bound.
        minimum: String,
    },
}

impl VersionError {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> VersionErrorKind {
        match self {
            Self::Unparseable { .. } => VersionErrorKind::Unparseable,
            Self::BelowMinimum { .. } => VersionErrorKind::BelowMinimum,
        }
    }
}
