//! # Display Name Resolver
//!
//! Mention names and creator attribution names.

use std::sync::Arc;

use shared_types::{NameFormat, ResolutionError, User, UserDirectory, UserId};
use tracing::debug;

/// Prefix that turns a handle into a mention.
pub const MENTION_MARKER: char = '@';

/// Resolve a principal through the directory.
pub fn lookup_user(users: &dyn UserDirectory, user_id: &UserId) -> Result<User, ResolutionError> {
    users.get_user(user_id).map_err(|e| {
        debug!(user_id = %user_id, error = %e, "Principal could not be resolved");
        ResolutionError::new(user_id.clone(), e)
    })
}

/// `@handle`, used for generic "who did X" attributions such as voters.
pub fn mention_name(users: &dyn UserDirectory, user_id: &UserId) -> Result<String, ResolutionError> {
    let user = lookup_user(users, user_id)?;
    let mut name = String::with_capacity(user.username.len() + 1);
    name.push(MENTION_MARKER);
    name.push_str(&user.display_name(NameFormat::Username));
    Ok(name)
}

/// Richest available name, used to credit a poll's creator.
///
/// Tries the nickname, then the full name, then the handle, taking the first
/// that is non-empty once the mention marker and surrounding whitespace are
/// removed. Never carries the mention marker, even if a user put one in
/// their nickname.
pub fn creator_attribution_name(
    users: &dyn UserDirectory,
    user_id: &UserId,
) -> Result<String, ResolutionError> {
    let user = lookup_user(users, user_id)?;
    let candidates = [
        user.nickname.clone(),
        user.full_name(),
        user.display_name(NameFormat::Username),
    ];
    let name = candidates
        .iter()
        .map(|candidate| without_marker(candidate))
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default();
    Ok(name.to_string())
}

fn without_marker(name: &str) -> &str {
    name.trim().trim_start_matches(MENTION_MARKER).trim()
}

/// Both naming policies bound to one directory.
#[derive(Clone)]
pub struct DisplayNameResolver {
    users: Arc<dyn UserDirectory>,
}

impl DisplayNameResolver {
    /// Bind the resolver to a directory.
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// See [`mention_name`].
    pub fn mention_name(&self, user_id: &UserId) -> Result<String, ResolutionError> {
        mention_name(self.users.as_ref(), user_id)
    }

    /// See [`creator_attribution_name`].
    pub fn creator_attribution_name(&self, user_id: &UserId) -> Result<String, ResolutionError> {
        creator_attribution_name(self.users.as_ref(), user_id)
    }
}
