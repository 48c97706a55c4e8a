//! Admin login client

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{ReelpageError, Result};
use crate::session::Session;

use super::ApiClient;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Exchanges admin credentials for a bearer token.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /admin/login`. Does not persist anything; the caller decides
    /// where the returned session goes.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let request = self
            .api
            .request(Method::POST, "/admin/login", None)
            .json(&LoginRequest { email, password });

        let response: LoginResponse = self.api.send(request).await?;
        let session = Session::new(response.token)
            .ok_or_else(|| ReelpageError::auth("Backend returned an empty token"))?;
        info!("Admin login succeeded for {}", email);
        Ok(session)
    }
}
