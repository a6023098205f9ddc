//! # Ports
//!
//! Outbound dependencies of the identity bootstrapper.

pub mod outbound;

pub use outbound::*;
