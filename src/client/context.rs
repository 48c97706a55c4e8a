//! Client bundle shared by controllers and CLI commands

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::errors::Result;
use crate::session::{FileSessionStore, SessionStore};

use super::{ApiClient, AuthClient, CampaignClient, TrackingClient};

/// Everything a controller needs to talk to the backend.
///
/// Created once per CLI invocation. The session store is shared, never the
/// token itself.
#[derive(Clone)]
pub struct ClientContext {
    pub auth: AuthClient,
    pub campaigns: CampaignClient,
    pub tracking: TrackingClient,
    pub sessions: Arc<dyn SessionStore>,
    /// Public landing site, used for og:url
    pub site_url: String,
}

impl ClientContext {
    pub fn new(api: ApiClient, sessions: Arc<dyn SessionStore>, site_url: impl Into<String>) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            campaigns: CampaignClient::new(api.clone()),
            tracking: TrackingClient::new(api),
            sessions,
            site_url: site_url.into(),
        }
    }

    /// Build from the global configuration with a file-backed session store.
    pub fn from_config() -> Result<Self> {
        let config = crate::config::get_config();
        Self::from_api_config(&config.api, Arc::new(FileSessionStore::from_config()))
    }

    pub fn from_api_config(api: &ApiConfig, sessions: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self::new(ApiClient::new(api)?, sessions, api.site_url.clone()))
    }
}
