//! Explicit session context
//!
//! The auth token and per-user "following" flags are injected at
//! construction so tests can substitute fakes and nothing in the core
//! reaches for global state.

use std::collections::HashSet;

/// Read-only session context injected into the tracker and synchronizer
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The authenticated user's identifier
    pub user_id: String,
    /// Cached auth token, owned by the external auth collaborator
    pub auth_token: Option<String>,
    /// User ids the session user follows
    pub following: HashSet<String>,
}

impl Session {
    /// Create a session for the given user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            auth_token: None,
            following: HashSet::new(),
        }
    }

    /// Attach an auth token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Seed the following set
    pub fn with_following(mut self, following: impl IntoIterator<Item = String>) -> Self {
        self.following = following.into_iter().collect();
        self
    }

    /// Whether the session user follows the given user
    pub fn is_following(&self, user_id: &str) -> bool {
        self.following.contains(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_following_lookup() {
        let session = Session::new("u1").with_following(vec!["u2".to_string()]);
        assert!(session.is_following("u2"));
        assert!(!session.is_following("u3"));
    }
}
