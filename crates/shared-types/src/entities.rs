//! # Core Domain Entities
//!
//! Defines the entities the add-on core inspects but does not own.
//!
//! ## Clusters
//!
//! - **Identifiers**: `UserId`, `ChannelId`, `PollId`
//! - **Principals**: `User`, `NameFormat`, role IDs
//! - **Polls**: `Poll`
//! - **Messaging**: `Post`

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTIFIERS
// =============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True if the identifier is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque host identifier of a user account (human or bot).
    UserId
);

string_id!(
    /// Opaque host identifier of a channel.
    ChannelId
);

string_id!(
    /// Identifier of a poll inside the poll store.
    PollId
);

// =============================================================================
// PRINCIPALS
// =============================================================================

/// Role ID the host assigns to system administrators.
pub const SYSTEM_ADMIN_ROLE_ID: &str = "system_admin";

/// Role ID every regular account carries.
pub const SYSTEM_USER_ROLE_ID: &str = "system_user";

/// A user account as reported by the host's account directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Short handle, unique per host.
    pub username: String,
    /// Optional free-form nickname.
    #[serde(default)]
    pub nickname: String,
    /// Optional given name.
    #[serde(default)]
    pub first_name: String,
    /// Optional family name.
    #[serde(default)]
    pub last_name: String,
    /// Space separated role IDs, as the host stores them.
    #[serde(default)]
    pub roles: String,
}

impl User {
    /// Create a user with only a handle and the regular user role.
    pub fn new(id: impl Into<UserId>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            roles: SYSTEM_USER_ROLE_ID.to_string(),
            ..Self::default()
        }
    }

    /// Set the nickname.
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    /// Set given and family name.
    pub fn with_full_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Replace the role string.
    pub fn with_roles(mut self, roles: impl Into<String>) -> Self {
        self.roles = roles.into();
        self
    }

    /// Check whether the account holds exactly the given role ID.
    #[must_use]
    pub fn is_in_role(&self, role_id: &str) -> bool {
        self.roles.split_whitespace().any(|role| role == role_id)
    }

    /// Check whether the account is a system administrator.
    #[must_use]
    pub fn is_system_admin(&self) -> bool {
        self.is_in_role(SYSTEM_ADMIN_ROLE_ID)
    }

    /// Given and family name joined, or whichever of the two is set.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Render the account name under the given host naming policy.
    #[must_use]
    pub fn display_name(&self, format: NameFormat) -> String {
        match format {
            NameFormat::Username => self.username.clone(),
            NameFormat::NicknameFullName => {
                if !self.nickname.is_empty() {
                    return self.nickname.clone();
                }
                let full_name = self.full_name();
                if !full_name.is_empty() {
                    return full_name;
                }
                self.username.clone()
            }
        }
    }
}

/// Host naming policies for rendering an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameFormat {
    /// Always the short handle.
    Username,
    /// Nickname, else full name, else handle.
    NicknameFullName,
}

// =============================================================================
// POLLS & POSTS
// =============================================================================

/// A poll as persisted by the poll store.
///
/// The core only ever reads `creator_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Poll identifier.
    pub id: PollId,
    /// Account that created the poll.
    pub creator_id: UserId,
    /// Question shown above the answer options.
    pub question: String,
    /// Answer options in display order.
    #[serde(default)]
    pub options: Vec<String>,
}

impl Poll {
    /// Create a poll.
    pub fn new(
        id: impl Into<PollId>,
        creator_id: impl Into<UserId>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            creator_id: creator_id.into(),
            question: question.into(),
            options: Vec::new(),
        }
    }

    /// Set the answer options.
    pub fn with_options(mut self, options: Vec<&str>) -> Self {
        self.options = options.into_iter().map(String::from).collect();
        self
    }
}

/// A message posted into a channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Post {
    /// Channel the post belongs to.
    pub channel_id: ChannelId,
    /// Author of the post.
    pub user_id: UserId,
    /// Markdown body.
    pub message: String,
}
