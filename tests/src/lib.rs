//! # Poll-Bot Test Suite
//!
//! Cross-crate scenarios run against the in-memory host.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── activation_flow.rs   # Stage ordering, fail-fast, lifecycle
//!     ├── request_services.rs  # Permissions and display names
//!     └── concurrency.rs       # Readers and writers of the activation gate
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pb-tests
//! cargo test -p pb-tests integration::concurrency::
//! ```

pub mod integration;
