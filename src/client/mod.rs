//! Client layer for the campaign backend
//!
//! All REST access goes through [`ApiClient`]; the typed clients below only
//! build requests and pick response types.
//!
//! # Architecture
//!
//! ```text
//! Controllers / CLI → AuthClient ─────┐
//!                   → CampaignClient ─┼→ ApiClient (reqwest) → backend
//!                   → TrackingClient ─┘
//! ```
//!
//! # Status Mapping
//!
//! - `401` / `403` → `ReelpageError::Auth`
//! - `404` → `ReelpageError::NotFound`
//! - `400` / `409` / `422` → `ReelpageError::Validation`
//! - other non-2xx → `ReelpageError::Server`
//! - transport failure or timeout → `ReelpageError::Network`
//! - undecodable body → `ReelpageError::Serialization`
//!
//! A `{"message": ...}` body, when present, becomes the error message.

mod context;

mod auth_client;
mod campaign_client;
mod tracking_client;

pub use auth_client::AuthClient;
pub use campaign_client::CampaignClient;
pub use context::ClientContext;
pub use tracking_client::TrackingClient;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::ApiConfig;
use crate::errors::{ReelpageError, Result};
use crate::session::Session;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Shared HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::build(&config.base_url, config.timeout_secs)
    }

    /// Client against an explicit base URL with the default timeout.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self> {
        Self::build(base_url.as_ref(), ApiConfig::default().timeout_secs)
    }

    fn build(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let parsed = url::Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ReelpageError::config(format!(
                "API base URL must be http(s): {}",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("reelpage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReelpageError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request; attaches the bearer token when a session is given.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> RequestBuilder {
        debug!("API request: {} {}", method, path);
        let request = self.client.request(method, self.url(path));
        match session {
            Some(session) => request.bearer_auth(session.token()),
            None => request,
        }
    }

    /// Send and decode a JSON response, mapping non-2xx statuses to errors.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ReelpageError::network(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReelpageError::network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            debug!("API error status {}: {}", status, body);
            return Err(map_status(status, &body));
        }

        trace!("API response body: {}", body);
        serde_json::from_str(&body).map_err(|e| {
            ReelpageError::serialization(format!("Failed to parse response: {}", e))
        })
    }
}

/// Map a non-success status plus body to the crate error taxonomy.
pub fn map_status(status: StatusCode, body: &str) -> ReelpageError {
    let backend_message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty());

    // 后端没有消息时留空，由调用方决定默认文案
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ReelpageError::auth(backend_message.unwrap_or_default())
        }
        StatusCode::NOT_FOUND => ReelpageError::not_found(backend_message.unwrap_or_default()),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ReelpageError::validation(backend_message.unwrap_or_default())
        }
        _ => ReelpageError::server(backend_message.unwrap_or_default()),
    }
}

/// Encode a slug for use as a single path segment.
pub(crate) fn slug_segment(slug: &str) -> String {
    urlencoding::encode(slug).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status_auth() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = map_status(status, "");
            assert!(matches!(err, ReelpageError::Auth(_)), "got: {:?}", err);
        }
    }

    #[test]
    fn test_map_status_not_found_uses_backend_message() {
        let err = map_status(StatusCode::NOT_FOUND, r#"{"message":"Campaign not found"}"#);
        assert_eq!(err, ReelpageError::NotFound("Campaign not found".into()));
    }

    #[test]
    fn test_map_status_validation() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::CONFLICT,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            let err = map_status(status, r#"{"message":"Slug already exists"}"#);
            assert_eq!(err, ReelpageError::Validation("Slug already exists".into()));
        }
    }

    #[test]
    fn test_map_status_server() {
        let err = map_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err, ReelpageError::Server(String::new()));

        let err = map_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"Database unavailable"}"#,
        );
        assert_eq!(err, ReelpageError::Server("Database unavailable".into()));
    }

    #[test]
    fn test_map_status_blank_message_is_empty() {
        let err = map_status(StatusCode::NOT_FOUND, r#"{"message":"  "}"#);
        assert_eq!(err, ReelpageError::NotFound(String::new()));
    }

    #[test]
    fn test_slug_segment_encodes_reserved_chars() {
        assert_eq!(slug_segment("summer-sale"), "summer-sale");
        assert_eq!(slug_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:3000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/campaigns"), "http://localhost:3000/api/campaigns");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(matches!(
            ApiClient::with_base_url("ftp://example.com"),
            Err(ReelpageError::Config(_))
        ));
        assert!(ApiClient::with_base_url("not a url").is_err());
    }
}
