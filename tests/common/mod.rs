//! 测试共享工具：wiremock 后端与客户端上下文

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

use reelpage::client::{ApiClient, ClientContext};
use reelpage::session::{MemorySessionStore, SessionStore};

pub const SITE_URL: &str = "https://site.test";
pub const TOKEN: &str = "test-token";

pub fn api(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(format!("{}/api", server.uri())).expect("valid mock base url")
}

/// Context with a logged-in in-memory session.
pub fn logged_in(server: &MockServer) -> (ClientContext, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::with_token(TOKEN));
    let ctx = ClientContext::new(api(server), store.clone() as Arc<dyn SessionStore>, SITE_URL);
    (ctx, store)
}

/// Context with no session.
pub fn logged_out(server: &MockServer) -> (ClientContext, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let ctx = ClientContext::new(api(server), store.clone() as Arc<dyn SessionStore>, SITE_URL);
    (ctx, store)
}

pub fn bearer() -> String {
    format!("Bearer {}", TOKEN)
}

pub fn campaign_json(slug: &str) -> Value {
    json!({
        "_id": "665f1c2e9b1e8a0012345678",
        "slug": slug,
        "fullVideoUrl": format!("https://cdn.test/{}.mp4", slug),
        "fullThumbnailUrl": format!(" https://cdn.test/{}.jpg ", slug),
        "waLink": "https://wa.me/15551234567",
        "waButtonLabel": "Chat on WhatsApp",
        "caption": "Summer deals",
        "popupTriggerType": "seconds",
        "popupTriggerValue": 5,
        "tags": ["summer", "promo"],
        "createdAt": "2025-06-01T10:00:00.000Z",
        "updatedAt": "2025-06-01T10:00:00.000Z"
    })
}

pub fn track_response(kind: &str, slug: &str, source: &str) -> Value {
    json!({ "success": true, "event": kind, "slug": slug, "source": source })
}

pub fn analytics_detail_json(slug: &str) -> Value {
    json!({
        "campaignSlug": slug,
        "totalViews": 120,
        "totalPlays": 80,
        "totalCompletes": 40,
        "totalClicks": 12,
        "conversionRate": 10.0,
        "bySource": {
            "direct": { "views": 100, "plays": 70, "completes": 35, "clicks": 10 },
            "newsletter": { "views": 20, "plays": 10, "completes": 5, "clicks": 2 }
        },
        "byDate": [
            { "date": "2025-06-01", "views": 60, "plays": 40, "completes": 20, "clicks": 6 },
            { "date": "2025-06-02", "views": 60, "plays": 40, "completes": 20, "clicks": 6 }
        ]
    })
}
