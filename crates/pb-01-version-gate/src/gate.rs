//! # Version Gate
//!
//! `check(host_version) -> Ok | VersionError`. Fatal to activation on
//! failure; never retried.

use semver::Version;
use tracing::{debug, warn};

use crate::domain::minimum::parse_version;
use crate::domain::{MinimumVersion, VersionError};

/// Compares a host-reported version against a fixed minimum.
#[derive(Debug, Clone, Default)]
pub struct VersionGate {
    minimum: MinimumVersion,
}

impl VersionGate {
    /// Create a gate with the given lower bound.
    pub fn new(minimum: MinimumVersion) -> Self {
        Self { minimum }
    }

    /// The configured lower bound.
    pub fn minimum(&self) -> &MinimumVersion {
        &self.minimum
    }

    /// Check the host version, returning it parsed on success.
    pub fn check(&self, host_version: &str) -> Result<Version, VersionError> {
        let version = parse_version(host_version).inspect_err(|e| {
            warn!(host_version, error = %e, "Host version is not a semantic version");
        })?;

        if !self.minimum.is_satisfied_by(&version) {
            warn!(
                host_version,
                minimum = %self.minimum,
                "Host version below supported minimum"
            );
            return Err(VersionError::BelowMinimum {
                found: version.to_string(),
                minimum: self.minimum.to_string(),
            });
        }

        debug!(host_version, minimum = %self.minimum, "Host version accepted");
        Ok(version)
    }
}
