//! # Plugin Runtime
//!
//! Lifecycle core of the poll add-on. The `plugin-runtime` binary is an
//! activation harness; this library holds everything it drives.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: every host capability is a port in
//!   [`ports`]; [`adapters`] provides in-memory implementations.
//! - **Explicit Lifecycle**: [`activation::ActivationState`] replaces a bare
//!   "activated" flag with a guarded state machine.
//! - **Ordered Stages**: [`activation::ActivationSequencer`] runs named
//!   stages and stops at the first failure, with no compensation.
//!
//! ## Module Structure
//!
//! ```text
//! plugin-runtime/
//! ├── activation/      # Stages, errors, lifecycle state, sequencer
//! ├── adapters/        # In-memory host, store, catalog, routes
//! ├── config/          # PluginConfig, PluginSettings
//! ├── ports/           # Host-facing traits and PluginHost
//! └── plugin.rs        # PollPlugin facade
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activation;
pub mod adapters;
pub mod config;
pub mod plugin;
pub mod ports;

// Re-exports
pub use activation::{ActivationError, ActivationErrorKind, ActivationStage, LifecycleState};
pub use config::{PluginConfig, PluginSettings};
pub use plugin::PollPlugin;
pub use ports::PluginHost;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
