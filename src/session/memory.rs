use parking_lot::RwLock;

use super::{Session, SessionStore};
use crate::errors::Result;

/// In-process store, for embedding and tests.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            inner: RwLock::new(Session::new(token)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.inner.write() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.inner.write() = None;
        Ok(())
    }
}
