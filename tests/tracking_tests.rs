//! 埋点集成测试
//!
//! 事件请求格式、去重、失败不阻塞。

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api, campaign_json, track_response};
use reelpage::client::{CampaignClient, TrackingClient};
use reelpage::controllers::LandingController;
use reelpage::models::EventKind;
use reelpage::tracking::{PageTracker, Tracker, resolve_source};

fn tracker(server: &MockServer) -> Tracker {
    Tracker::new(Arc::new(TrackingClient::new(api(server))))
}

#[tokio::test]
async fn test_track_view_sends_exactly_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/track/view/demo-campaign"))
        .and(query_param("source", "newsletter"))
        .and(body_json(json!({})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(track_response("view", "demo-campaign", "newsletter")),
        )
        .expect(1)
        .mount(&server)
        .await;

    tracker(&server)
        .track_view("demo-campaign", Some("newsletter"))
        .await
        .unwrap();
    server.verify().await;
}

#[tokio::test]
async fn test_missing_source_falls_back_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/track/click/demo-campaign"))
        .and(query_param("source", "direct"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(track_response("click", "demo-campaign", "direct")),
        )
        .expect(1)
        .mount(&server)
        .await;

    tracker(&server)
        .track_click("demo-campaign", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_failing_backend_neither_errors_nor_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/track/play/demo-campaign"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let handle = tracker(&server).track_play("demo-campaign", Some("newsletter"));
    assert!(started.elapsed() < Duration::from_millis(200));

    // 任务内部吞掉错误，不会 panic
    assert!(handle.await.is_ok());
}

#[tokio::test]
async fn test_page_tracker_dedups_against_backend() {
    let server = MockServer::start().await;
    for kind in ["view", "play", "complete"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/track/{}/demo", kind)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(track_response(kind, "demo", "direct")),
            )
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/api/track/click/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(track_response("click", "demo", "direct")))
        .expect(2)
        .mount(&server)
        .await;

    let page = PageTracker::new(tracker(&server));
    for _ in 0..3 {
        page.track_once(EventKind::View, "demo");
        page.track_once(EventKind::Play, "demo");
        page.track_once(EventKind::Complete, "demo");
    }
    page.track_once(EventKind::Click, "demo");
    page.track_once(EventKind::Click, "demo");
    page.settle().await;

    server.verify().await;
}

#[tokio::test]
async fn test_landing_page_reports_each_event_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/demo-campaign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(campaign_json("demo-campaign")))
        .mount(&server)
        .await;
    for kind in ["view", "play", "complete"] {
        Mock::given(method("POST"))
            .and(path(format!("/api/track/{}/demo-campaign", kind)))
            .and(query_param("source", "newsletter"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(track_response(kind, "demo-campaign", "newsletter")),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let landing_url =
        Url::parse("https://site.test/campaigns/demo-campaign?utm_source=newsletter").unwrap();
    let tracker = tracker(&server).with_default_source(resolve_source(&landing_url));
    let mut page = LandingController::new(
        CampaignClient::new(api(&server)),
        tracker,
        common::SITE_URL,
    );

    page.load("demo-campaign").await;
    page.load("demo-campaign").await;
    assert!(page.on_play());
    assert!(!page.on_play());
    assert!(page.on_complete());
    assert!(!page.on_complete());
    page.settle().await;

    server.verify().await;
}
