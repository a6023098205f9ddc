//! # Authorization Model
//!
//! `can_modify(poll, principal) -> bool | ResolutionError`.

use std::sync::Arc;

use shared_types::{Poll, ResolutionError, UserDirectory, UserId};
use tracing::debug;

use crate::domain::Decision;

/// Decide which rule, if any, lets `principal` end or delete `poll`.
pub fn decide(
    users: &dyn UserDirectory,
    poll: &Poll,
    principal: &UserId,
) -> Result<Decision, ResolutionError> {
    if *principal == poll.creator_id {
        debug!(poll_id = %poll.id, principal = %principal, "Principal owns poll");
        return Ok(Decision::Creator);
    }

    let user = users
        .get_user(principal)
        .map_err(|e| ResolutionError::new(principal.clone(), e))?;

    let decision = if user.is_system_admin() {
        Decision::SystemAdmin
    } else {
        Decision::Denied
    };

    debug!(
        poll_id = %poll.id,
        principal = %principal,
        decision = decision.as_str(),
        "Authorization decided"
    );
    Ok(decision)
}

/// True if `principal` may end or delete `poll`.
pub fn can_modify(
    users: &dyn UserDirectory,
    poll: &Poll,
    principal: &UserId,
) -> Result<bool, ResolutionError> {
    decide(users, poll, principal).map(Decision::is_permitted)
}

/// Authorization model bound to a user directory.
///
/// Holds no state besides the directory handle, so it is safe to share across
/// any number of concurrent requests.
#[derive(Clone)]
pub struct AuthorizationModel {
    users: Arc<dyn UserDirectory>,
}

impl AuthorizationModel {
    /// Bind the model to a directory.
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// See [`decide`].
    pub fn decide(&self, poll: &Poll, principal: &UserId) -> Result<Decision, ResolutionError> {
        decide(self.users.as_ref(), poll, principal)
    }

    /// See [`can_modify`].
    pub fn can_modify(&self, poll: &Poll, principal: &UserId) -> Result<bool, ResolutionError> {
        can_modify(self.users.as_ref(), poll, principal)
    }
}
