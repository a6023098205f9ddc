//! # Shared Ports
//!
//! The account lookup contract used by authorization and by display-name
//! resolution, plus an in-memory directory for wiring and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::entities::{User, UserId};
use crate::errors::HostError;

/// Host account directory - outbound port.
///
/// Implementations may block on network I/O; callers must not hold locks
/// across a call.
pub trait UserDirectory: Send + Sync {
    /// Fetch one account by ID.
    fn get_user(&self, user_id: &UserId) -> Result<User, HostError>;
}

// =============================================================================
// In-memory implementation
// =============================================================================

/// In-memory user directory.
///
/// Counts every lookup and can be switched into a failing mode to simulate an
/// unreachable host.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, User>>,
    lookups: AtomicUsize,
    unreachable: AtomicBool,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding the given accounts.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    /// Add or replace an account.
    pub fn insert(&self, user: User) {
        self.users.write().insert(user.id.clone(), user);
    }

    /// Remove an account, simulating deletion on the host.
    pub fn remove(&self, user_id: &UserId) -> Option<User> {
        self.users.write().remove(user_id)
    }

    /// Make every subsequent lookup fail (or succeed again).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Number of `get_user` calls served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_user(&self, user_id: &UserId) -> Result<User, HostError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if self.unreachable.load(Ordering::SeqCst) {
            return Err(HostError::unavailable("user directory unreachable"));
        }

        self.users
            .read()
            .get(user_id)
            .cloned()
            .ok_or_else(|| HostError::not_found(format!("user {user_id}")))
    }
}
