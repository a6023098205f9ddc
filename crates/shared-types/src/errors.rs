//! # Error Types
//!
//! Defines the error every host collaborator reports, and the principal
//! resolution failure shared by authorization and display-name lookup.

use thiserror::Error;

use crate::entities::UserId;

/// Error returned by a host API call.
///
/// The host decides the code; the core only carries it upward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct HostError {
    /// Host-defined error identifier, e.g. `app.user.missing_account.const`.
    pub code: String,
    /// Human-readable detail.
    pub message: String,
}

impl HostError {
    /// Create a host error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing entity.
    pub fn not_found(what: impl Into<String>) -> Self {
        let what = what.into();
        Self::new("not_found", format!("{what} not found"))
    }

    /// Shorthand for an unreachable host.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new("unavailable", message)
    }
}

/// A principal could not be resolved through the host account directory.
///
/// Callers treat this as "unknown user"; it is never coerced into a default
/// permission or a placeholder name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to resolve user {user_id}: {source}")]
pub struct ResolutionError {
    /// The principal that was looked up.
    pub user_id: UserId,
    /// Host failure.
    #[source]
    pub source: HostError,
}

impl ResolutionError {
    /// Wrap a lookup failure for `user_id`.
    pub fn new(user_id: UserId, source: HostError) -> Self {
        Self { user_id, source }
    }
}
