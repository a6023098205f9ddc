//! # Activation State
//!
//! The one piece of shared mutable state in the runtime: which lifecycle
//! state the add-on is in and, when active, the components activation
//! produced.
//!
//! Readers take the shared lock only long enough to copy a flag or clone an
//! `Arc`. Writers are the lifecycle transitions. A generation counter is
//! bumped on every `begin` and `deactivate`, so an activation that loses a
//! race with deactivation cannot commit afterwards.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use pb_02_identity_bootstrap::{Localizer, ServiceIdentity};
use semver::Version;
use shared_types::UserId;

use super::error::ActivationError;
use crate::ports::{PollStore, RouteTable};

/// Lifecycle state of the add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Not serving requests.
    #[default]
    Inactive,
    /// Activation stages are running.
    Activating,
    /// All stages succeeded.
    Active,
}

impl LifecycleState {
    /// Stable label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Activating => "activating",
            Self::Active => "active",
        }
    }
}

/// Everything a successful activation produced.
#[derive(Clone)]
pub struct ActiveComponents {
    /// The bot account.
    pub identity: ServiceIdentity,
    /// Poll store, namespaced by plugin version.
    pub store: Arc<dyn PollStore>,
    /// Translation bundle.
    pub localizer: Arc<dyn Localizer>,
    /// HTTP routes.
    pub routes: Arc<RouteTable>,
    /// Host version that passed the gate.
    pub server_version: Version,
    /// Host site URL.
    pub site_url: String,
}

impl ActiveComponents {
    /// Bot account ID.
    pub fn bot_user_id(&self) -> &UserId {
        &self.identity.bot_user_id
    }
}

impl fmt::Debug for ActiveComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveComponents")
            .field("bot_user_id", &self.identity.bot_user_id)
            .field("routes", &self.routes.len())
            .field("server_version", &self.server_version)
            .field("site_url", &self.site_url)
            .finish_non_exhaustive()
    }
}

/// Proof that the holder started the current activation attempt.
#[derive(Debug)]
#[must_use = "an activation ticket must be committed or aborted"]
pub struct ActivationTicket {
    generation: u64,
}

/// Outcome of trying to enter `Activating`.
#[derive(Debug)]
pub enum Admission {
    /// The caller owns the new attempt.
    Start(ActivationTicket),
    /// The add-on is already active; nothing to do.
    AlreadyActive,
}

#[derive(Default)]
struct Inner {
    state: LifecycleState,
    components: Option<Arc<ActiveComponents>>,
    generation: u64,
}

/// Process-wide activation state.
#[derive(Default)]
pub struct ActivationState {
    inner: RwLock<Inner>,
}

impl ActivationState {
    /// Create an inactive state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Activating` from `Inactive`.
    ///
    /// Fails with [`ActivationError::AlreadyActivating`] if another attempt
    /// holds the state.
    pub fn begin(&self) -> Result<Admission, ActivationError> {
        let mut inner = self.inner.write();
        match inner.state {
            LifecycleState::Activating => Err(ActivationError::AlreadyActivating),
            LifecycleState::Active => Ok(Admission::AlreadyActive),
            LifecycleState::Inactive => {
                inner.generation += 1;
                inner.state = LifecycleState::Activating;
                inner.components = None;
                Ok(Admission::Start(ActivationTicket {
                    generation: inner.generation,
                }))
            }
        }
    }

    /// Publish components and enter `Active`.
    ///
    /// Fails with [`ActivationError::Superseded`] if the add-on was
    /// deactivated after `begin`.
    pub fn commit(
        &self,
        ticket: ActivationTicket,
        components: ActiveComponents,
    ) -> Result<Arc<ActiveComponents>, ActivationError> {
        let mut inner = self.inner.write();
        if inner.generation != ticket.generation || inner.state != LifecycleState::Activating {
            return Err(ActivationError::Superseded);
        }
        let components = Arc::new(components);
        inner.state = LifecycleState::Active;
        inner.components = Some(Arc::clone(&components));
        Ok(components)
    }

    /// Return to `Inactive` after a failed attempt.
    ///
    /// No-op if the attempt was already superseded.
    pub fn abort(&self, ticket: ActivationTicket) {
        let mut inner = self.inner.write();
        if inner.generation == ticket.generation && inner.state == LifecycleState::Activating {
            inner.state = LifecycleState::Inactive;
            inner.components = None;
        }
    }

    /// Enter `Inactive` unconditionally. Returns the state that was left.
    pub fn deactivate(&self) -> LifecycleState {
        let mut inner = self.inner.write();
        let previous = inner.state;
        inner.generation += 1;
        inner.state = LifecycleState::Inactive;
        inner.components = None;
        previous
    }

    /// True once every stage succeeded and until deactivation.
    pub fn is_activated(&self) -> bool {
        self.inner.read().state == LifecycleState::Active
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.inner.read().state
    }

    /// Components of the current activation, if active.
    pub fn components(&self) -> Option<Arc<ActiveComponents>> {
        self.inner.read().components.clone()
    }
}
