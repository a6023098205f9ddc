//! # Domain Module
//!
//! Core domain types for the identity bootstrapper.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
