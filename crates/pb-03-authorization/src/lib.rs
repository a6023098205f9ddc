//! # PB-03 Authorization
//!
//! Decides whether a principal may perform a privileged mutation (end or
//! delete) on a poll.
//!
//! **Component ID:** 4  
//! **Architecture:** Stateless decision over the `UserDirectory` port
//!
//! ## Decision Order
//!
//! First match wins:
//!
//! 1. principal is the poll creator → permit, with no directory lookup
//! 2. directory lookup fails → error (never a silent permit or deny)
//! 3. principal holds `system_admin` → permit
//! 4. otherwise → deny
//!
//! Ownership is checked first so that a flaky directory never blocks a
//! creator from managing their own poll.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod model;

// Re-exports
pub use domain::Decision;
pub use model::{can_modify, decide, AuthorizationModel};
pub use shared_types::ResolutionError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
