//! # Domain Module
//!
//! Core domain types for the version gate.

pub mod errors;
pub mod minimum;

pub use errors::*;
pub use minimum::*;
