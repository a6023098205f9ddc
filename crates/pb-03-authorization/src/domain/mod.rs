//! # Domain Module
//!
//! Outcome of an authorization decision.

pub mod decision;

pub use decision::*;
