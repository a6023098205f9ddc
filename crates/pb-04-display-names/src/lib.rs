//! # PB-04 Display Names
//!
//! Maps opaque principal IDs to human-readable names for two UI contexts.
//!
//! **Component ID:** 5
//!
//! | Operation | Policy | Example |
//! |-----------|--------|---------|
//! | [`mention_name`] | `@` + handle | `@alice` |
//! | [`creator_attribution_name`] | nickname, else full name, else handle | `Alice Liddell` |
//!
//! The two are deliberately separate functions over one lookup primitive
//! ([`lookup_user`]). Both fail with [`ResolutionError`] when the principal
//! cannot be resolved; callers render that as "unknown user".

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod resolver;

// Re-exports
pub use resolver::{
    creator_attribution_name, lookup_user, mention_name, DisplayNameResolver, MENTION_MARKER,
};
pub use shared_types::ResolutionError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
