//! Session token storage and the admin-view guard
//!
//! The token is never cached: every authenticated action calls
//! [`require_session`] (or [`SessionStore::load`]) right before issuing its
//! request and threads the returned [`Session`] into the client call, so a
//! token replaced mid-session is picked up on the next action.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use std::fmt;

use crate::errors::{ReelpageError, Result};

/// Bearer token issued by the backend at login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Returns `None` for blank tokens so an empty file never counts as a session.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self { token })
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // token 不写入日志
        f.debug_struct("Session").field("token", &"***").finish()
    }
}

/// Client-persisted token storage.
pub trait SessionStore: Send + Sync {
    /// Read the current token, if any.
    fn load(&self) -> Option<Session>;

    /// Persist a token received from login.
    fn save(&self, session: &Session) -> Result<()>;

    /// Destroy the stored token (logout). Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}

/// Precondition check for admin-only views. No network access.
pub fn require_session(store: &dyn SessionStore) -> Result<Session> {
    store
        .load()
        .ok_or_else(|| ReelpageError::auth("Not logged in"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_rejects_blank_token() {
        assert!(Session::new("").is_none());
        assert!(Session::new("  \n").is_none());
        assert_eq!(Session::new(" abc \n").unwrap().token(), "abc");
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = Session::new("secret-token").unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_require_session() {
        let store = MemorySessionStore::new();
        assert!(matches!(
            require_session(&store),
            Err(ReelpageError::Auth(_))
        ));

        store.save(&Session::new("t1").unwrap()).unwrap();
        assert_eq!(require_session(&store).unwrap().token(), "t1");
    }
}
