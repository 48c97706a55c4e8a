//! Admin analytics dashboard
//!
//! The list of per-campaign summaries and the detail panel load
//! independently. Detail requests are numbered; a response whose number is
//! not the latest is dropped, so a slow answer for an old filter never
//! overwrites a newer one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::TrackingClient;
use crate::errors::Result;
use crate::models::{AnalyticsDetail, AnalyticsSummary, DateRange};
use crate::router::{Navigation, Route};
use crate::session::{SessionStore, require_session};

pub const LIST_LOAD_FAILED: &str = "Failed to load analytics";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load campaign analytics";

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Ready(Vec<AnalyticsSummary>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Idle,
    Loading,
    Ready(Box<AnalyticsDetail>),
    Error(String),
}

/// An issued detail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub seq: u64,
    pub slug: String,
    pub range: DateRange,
}

pub struct AnalyticsController {
    tracking: TrackingClient,
    sessions: Arc<dyn SessionStore>,
    list: ListState,
    detail: DetailState,
    selected: Option<String>,
    range: DateRange,
    seq: u64,
}

impl AnalyticsController {
    pub fn new(tracking: TrackingClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            tracking,
            sessions,
            list: ListState::Loading,
            detail: DetailState::Idle,
            selected: None,
            range: DateRange::unbounded(),
            seq: 0,
        }
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    /// Session guard, then load the summary list.
    pub async fn enter(&mut self) -> Navigation {
        let Ok(session) = require_session(self.sessions.as_ref()) else {
            debug!("Analytics: no session, redirecting to login");
            return Navigation::to_login();
        };

        self.list = ListState::Loading;
        match self.tracking.get_all_analytics(&session).await {
            Ok(summaries) => {
                self.list = ListState::Ready(summaries);
                Navigation::Stay
            }
            Err(e) if e.is_auth() => Navigation::to_login(),
            Err(e) => {
                warn!("Failed to load analytics: {}", e);
                self.list = ListState::Error(e.user_message(LIST_LOAD_FAILED));
                Navigation::Stay
            }
        }
    }

    /// Select a campaign and load its detail with the current filter.
    pub async fn view_details(&mut self, slug: &str) -> Navigation {
        let Ok(session) = require_session(self.sessions.as_ref()) else {
            return Navigation::to_login();
        };

        let request = self.begin_detail_request(slug);
        if let Err(e) = request.range.validate() {
            self.detail = DetailState::Error(e.message().to_string());
            return Navigation::Stay;
        }

        let result = self
            .tracking
            .get_campaign_analytics(&session, &request.slug, &request.range)
            .await;
        self.complete_detail(request.seq, result)
    }

    /// Mark a new detail request as the latest and enter `Loading`.
    pub fn begin_detail_request(&mut self, slug: &str) -> DetailRequest {
        self.seq += 1;
        self.selected = Some(slug.to_string());
        self.detail = DetailState::Loading;
        DetailRequest {
            seq: self.seq,
            slug: slug.to_string(),
            range: self.range,
        }
    }

    /// Apply a detail response. Responses from superseded requests are ignored.
    pub fn complete_detail(&mut self, seq: u64, result: Result<AnalyticsDetail>) -> Navigation {
        if seq != self.seq || self.selected.is_none() {
            debug!("Analytics: discarding stale detail response #{}", seq);
            return Navigation::Stay;
        }
        match result {
            Ok(detail) => {
                self.detail = DetailState::Ready(Box::new(detail));
                Navigation::Stay
            }
            Err(e) if e.is_auth() => Navigation::to_login(),
            Err(e) => {
                debug!("Failed to load campaign analytics: {}", e);
                self.detail = DetailState::Error(e.user_message(DETAIL_LOAD_FAILED));
                Navigation::Stay
            }
        }
    }

    /// Set the filter and re-fetch the selected campaign, if any.
    pub async fn apply_date_filter(&mut self, range: DateRange) -> Navigation {
        self.range = range;
        self.reload_selected().await
    }

    /// Reset both bounds and re-fetch the selected campaign, if any.
    pub async fn clear_date_filter(&mut self) -> Navigation {
        self.range = DateRange::unbounded();
        self.reload_selected().await
    }

    async fn reload_selected(&mut self) -> Navigation {
        match self.selected.clone() {
            Some(slug) => self.view_details(&slug).await,
            None => Navigation::Stay,
        }
    }

    /// Drop the selection; any response still in flight is ignored.
    pub fn close_details(&mut self) {
        self.selected = None;
        self.detail = DetailState::Idle;
        self.seq += 1;
    }

    pub fn back(&self) -> Navigation {
        Navigation::Redirect(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::errors::ReelpageError;
    use crate::session::MemorySessionStore;
    use serde_json::json;

    fn controller() -> AnalyticsController {
        let api = ApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        AnalyticsController::new(
            TrackingClient::new(api),
            Arc::new(MemorySessionStore::with_token("t")),
        )
    }

    fn detail(slug: &str, views: u64) -> AnalyticsDetail {
        serde_json::from_value(json!({
            "campaignSlug": slug,
            "totalViews": views,
            "bySource": {},
            "byDate": [],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_view_details_without_session_leaves_state_untouched() {
        let api = ApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        let mut ctrl =
            AnalyticsController::new(TrackingClient::new(api), Arc::new(MemorySessionStore::new()));

        let nav = ctrl.view_details("a").await;
        assert_eq!(nav, Navigation::to_login());
        assert_eq!(ctrl.detail(), &DetailState::Idle);
        assert!(ctrl.selected().is_none());
    }

    #[test]
    fn test_stale_detail_response_is_discarded() {
        let mut ctrl = controller();
        let first = ctrl.begin_detail_request("a");
        let second = ctrl.begin_detail_request("a");
        assert!(second.seq > first.seq);

        ctrl.complete_detail(second.seq, Ok(detail("a", 2)));
        ctrl.complete_detail(first.seq, Ok(detail("a", 1)));

        match ctrl.detail() {
            DetailState::Ready(d) => assert_eq!(d.total_views, 2),
            other => panic!("Expected Ready, got: {:?}", other),
        }
    }

    #[test]
    fn test_response_after_close_is_ignored() {
        let mut ctrl = controller();
        let req = ctrl.begin_detail_request("a");
        ctrl.close_details();
        ctrl.complete_detail(req.seq, Ok(detail("a", 1)));
        assert_eq!(ctrl.detail(), &DetailState::Idle);
        assert!(ctrl.selected().is_none());
    }

    #[test]
    fn test_detail_error_messages() {
        let mut ctrl = controller();
        let req = ctrl.begin_detail_request("a");
        ctrl.complete_detail(req.seq, Err(ReelpageError::server("boom")));
        assert_eq!(
            ctrl.detail(),
            &DetailState::Error(DETAIL_LOAD_FAILED.to_string())
        );

        let req = ctrl.begin_detail_request("a");
        let nav = ctrl.complete_detail(req.seq, Err(ReelpageError::auth("")));
        assert_eq!(nav, Navigation::to_login());
    }

    #[tokio::test]
    async fn test_invalid_range_fails_without_request() {
        let mut ctrl = controller();
        let range = DateRange::parse(Some("2025-07-01"), Some("2025-06-01")).unwrap();
        ctrl.begin_detail_request("a");
        let nav = ctrl.apply_date_filter(range).await;
        assert_eq!(nav, Navigation::Stay);
        assert!(matches!(ctrl.detail(), DetailState::Error(_)));
    }

    #[tokio::test]
    async fn test_guard_redirects_without_session() {
        let api = ApiClient::with_base_url("http://127.0.0.1:9/api").unwrap();
        let mut ctrl =
            AnalyticsController::new(TrackingClient::new(api), Arc::new(MemorySessionStore::new()));
        assert_eq!(ctrl.enter().await, Navigation::to_login());
        assert_eq!(ctrl.list(), &ListState::Loading);
    }
}
