//! Host-facing ports of the runtime.

pub mod outbound;

pub use outbound::*;
