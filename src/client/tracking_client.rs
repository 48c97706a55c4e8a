//! Tracking endpoints: public event pings and authenticated analytics reads

use reqwest::Method;
use serde_json::json;

use crate::errors::Result;
use crate::models::{AnalyticsDetail, AnalyticsSummary, DateRange, EventKind, TrackEvent, TrackResponse};
use crate::session::Session;

use super::{ApiClient, slug_segment};

#[derive(Debug, Clone)]
pub struct TrackingClient {
    api: ApiClient,
}

impl TrackingClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /track/{kind}/{slug}?source=..` with an empty JSON body.
    ///
    /// This is the awaited form; fire-and-forget emission goes through
    /// [`crate::tracking::Tracker`].
    pub async fn send_event(&self, event: &TrackEvent) -> Result<TrackResponse> {
        let path = format!("/track/{}/{}", event.kind, slug_segment(&event.slug));
        let request = self
            .api
            .request(Method::POST, &path, None)
            .query(&[("source", event.source.as_str())])
            .json(&json!({}));
        self.api.send(request).await
    }

    pub async fn track(&self, kind: EventKind, slug: &str, source: &str) -> Result<TrackResponse> {
        self.send_event(&TrackEvent::new(kind, slug, source)).await
    }

    /// Per-campaign summaries for every campaign.
    pub async fn get_all_analytics(&self, session: &Session) -> Result<Vec<AnalyticsSummary>> {
        let request = self
            .api
            .request(Method::GET, "/track/analytics", Some(session));
        self.api.send(request).await
    }

    /// Detailed analytics for one campaign, optionally bounded by date.
    pub async fn get_campaign_analytics(
        &self,
        session: &Session,
        slug: &str,
        range: &DateRange,
    ) -> Result<AnalyticsDetail> {
        range.validate()?;
        let path = format!("/track/analytics/{}", slug_segment(slug));
        let mut request = self.api.request(Method::GET, &path, Some(session));
        let params = range.query_pairs();
        if !params.is_empty() {
            request = request.query(&params);
        }
        self.api.send(request).await
    }
}
