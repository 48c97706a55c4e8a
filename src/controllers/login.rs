use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::AuthClient;
use crate::router::{Navigation, Route};
use crate::session::SessionStore;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

/// Login form.
///
/// A second `submit` cannot start while one is awaiting: both need `&mut self`.
pub struct LoginController {
    auth: AuthClient,
    sessions: Arc<dyn SessionStore>,
    error: Option<String>,
}

impl LoginController {
    pub fn new(auth: AuthClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            auth,
            sessions,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exchange credentials for a token. On success the token is stored and
    /// the dashboard is next; on failure nothing is stored.
    pub async fn submit(&mut self, email: &str, password: &str) -> Navigation {
        self.error = None;

        let session = match self.auth.login(email, password).await {
            Ok(session) => session,
            Err(e) => {
                debug!("Login rejected: {}", e);
                self.error = Some(INVALID_CREDENTIALS.to_string());
                return Navigation::Stay;
            }
        };

        if let Err(e) = self.sessions.save(&session) {
            warn!("Failed to persist session: {}", e);
            self.error = Some(e.format_simple());
            return Navigation::Stay;
        }

        Navigation::Redirect(Route::Dashboard)
    }
}
