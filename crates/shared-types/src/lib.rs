//! # Shared Types Crate
//!
//! This crate contains the domain entities and host-facing contracts shared by
//! every crate of the poll add-on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Principals, polls and identifiers are defined
//!   here and nowhere else.
//! - **Host Errors Are Opaque**: Every host collaborator fails with
//!   [`HostError`]; crates wrap it in their own typed errors.
//! - **Narrow Ports**: The only port shared across crates is
//!   [`UserDirectory`], because both authorization and display-name
//!   resolution look principals up through it.

pub mod entities;
pub mod errors;
pub mod ports;

pub use entities::*;
pub use errors::*;
pub use ports::*;
