//! # Adapters
//!
//! Concrete implementations of the outbound ports that need no host.

pub mod bundle_assets;

pub use bundle_assets::FsBundleAssets;
