//! In-memory poll store.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_types::{HostError, Poll, PollId};

use crate::ports::PollStore;

/// Poll store kept in process memory, one per namespace.
#[derive(Debug)]
pub struct InMemoryPollStore {
    namespace: String,
    polls: RwLock<HashMap<PollId, Poll>>,
}

impl InMemoryPollStore {
    /// Create an empty store for `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            polls: RwLock::new(HashMap::new()),
        }
    }

    /// Namespace (plugin version) this store was opened with.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Number of stored polls.
    pub fn len(&self) -> usize {
        self.polls.read().len()
    }

    /// True if no poll is stored.
    pub fn is_empty(&self) -> bool {
        self.polls.read().is_empty()
    }
}

impl PollStore for InMemoryPollStore {
    fn get(&self, poll_id: &PollId) -> Result<Option<Poll>, HostError> {
        Ok(self.polls.read().get(poll_id).cloned())
    }

    fn save(&self, poll: &Poll) -> Result<(), HostError> {
        self.polls.write().insert(poll.id.clone(), poll.clone());
        Ok(())
    }

    fn delete(&self, poll_id: &PollId) -> Result<(), HostError> {
        self.polls.write().remove(poll_id);
        Ok(())
    }
}
