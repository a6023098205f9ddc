//! # Minimum Version Requirement
//!
//! The single inclusive lower bound the host version is compared against.

use std::fmt;

use semver::Version;

use super::errors::VersionError;

/// Oldest host release the add-on supports.
pub const MINIMUM_SERVER_VERSION: &str = "5.10.0";

/// Inclusive lower bound on the host version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumVersion(Version);

impl MinimumVersion {
    /// Parse a lower bound. Fails the same way a bad host version does.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        parse_version(version).map(Self)
    }

    /// The bound itself.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.0
    }

    /// True if `candidate` meets the bound.
    #[must_use]
    pub fn is_satisfied_by(&self, candidate: &Version) -> bool {
        candidate >= &self.0
    }
}

impl Default for MinimumVersion {
    fn default() -> Self {
        Self(Version::new(5, 10, 0))
    }
}

impl fmt::Display for MinimumVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Strict semantic-version parse, mapped into the gate's error.
pub(crate) fn parse_version(version: &str) -> Result<Version, VersionError> {
    Version::parse(version).map_err(|e| VersionError::Unparseable {
        version: version.to_string(),
        reason: e.to_string(),
    })
}
