//! Local preview handles for selected video files

use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;
use uuid::Uuid;

/// Tracks every preview handle that has not been released yet.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<DashMap<String, String>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a handle for `file_name`. Released when the handle drops.
    pub fn create(&self, file_name: &str) -> PreviewUrl {
        let url = format!("blob:reelpage/{}", Uuid::new_v4());
        self.live.insert(url.clone(), file_name.to_string());
        trace!("Preview created: {} ({})", url, file_name);
        PreviewUrl {
            url,
            registry: self.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains_key(url)
    }
}

/// A preview URL owned by exactly one form slot.
pub struct PreviewUrl {
    url: String,
    registry: PreviewRegistry,
}

impl PreviewUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for PreviewUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PreviewUrl").field(&self.url).finish()
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if self.registry.live.remove(&self.url).is_some() {
            trace!("Preview released: {}", self.url);
        }
    }
}
