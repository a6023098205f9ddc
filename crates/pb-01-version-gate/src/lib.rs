//! # PB-01 Version Gate
//!
//! Verifies that the host platform is recent enough to run the add-on.
//!
//! **Component ID:** 1  
//! **Architecture:** Hexagonal (DDD, leaf component with no ports)
//!
//! ## Contract
//!
//! - The host-reported version is parsed as a semantic version. A string that
//!   does not parse is a hard failure, never a silent pass.
//! - The check succeeds iff the parsed version is `>=` the configured
//!   minimum. There is no upper bound.
//! - Ordering follows semantic-versioning precedence, so `5.10.0-rc1` sorts
//!   below `5.10.0`.
//!
//! ## Module Structure
//!
//! ```text
//! pb-01-version-gate/
//! ├── domain/          # MinimumVersion, VersionError
//! └── gate.rs          # VersionGate::check
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod gate;

// Re-exports
pub use domain::{MinimumVersion, VersionError, VersionErrorKind, MINIMUM_SERVER_VERSION};
pub use gate::VersionGate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
