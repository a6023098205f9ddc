//! # Decision
//!
//! Which rule settled an authorization question.

/// Outcome of [`crate::decide`], naming the rule that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Principal created the poll.
    Creator,
    /// Principal is a system administrator.
    SystemAdmin,
    /// No rule granted access.
    Denied,
}

impl Decision {
    /// True for the permitting outcomes.
    #[must_use]
    pub fn is_permitted(self) -> bool {
        !matches!(self, Self::Denied)
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::SystemAdmin => "system_admin",
            Self::Denied => "denied",
        }
    }
}
