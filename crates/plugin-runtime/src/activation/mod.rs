//! # Activation
//!
//! The ordered, fail-fast startup procedure and the lifecycle state it
//! commits into.
//!
//! ```text
//!            on_activate                 all stages ok
//! Inactive ─────────────► Activating ─────────────────► Active
//!    ▲                        │                           │
//!    │      any stage fails   │        on_deactivate      │
//!    └────────────────────────┴───────────────────────────┘
//! ```
//!
//! Host calls run with no lock held. Only entering `Activating` and the final
//! commit take the write lock.

pub mod error;
pub mod sequencer;
pub mod stage;
pub mod state;

pub use error::{ActivationError, ActivationErrorKind};
pub use sequencer::ActivationSequencer;
pub use stage::ActivationStage;
pub use state::{ActivationState, ActivationTicket, ActiveComponents, Admission, LifecycleState};
