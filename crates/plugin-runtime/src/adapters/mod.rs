//! # Adapters
//!
//! In-memory implementations of every host port. The harness binary and the
//! test suites run activation against these instead of a live host.

pub mod catalog;
pub mod in_memory_host;
pub mod poll_store;
pub mod routes;

pub use catalog::CatalogLocalizer;
pub use in_memory_host::{HostCall, InMemoryHost};
pub use poll_store::InMemoryPollStore;
pub use routes::poll_api_routes;
