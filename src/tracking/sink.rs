use parking_lot::Mutex;

use crate::client::TrackingClient;
use crate::models::{TrackEvent, TrackResponse};

/// 埋点发送 Sink
#[async_trait::async_trait]
pub trait TrackSink: Send + Sync {
    async fn send(&self, event: TrackEvent) -> anyhow::Result<TrackResponse>;
}

#[async_trait::async_trait]
impl TrackSink for TrackingClient {
    async fn send(&self, event: TrackEvent) -> anyhow::Result<TrackResponse> {
        Ok(self.send_event(&event).await?)
    }
}

/// 内存 Sink，记录所有事件（测试与 dry-run 使用）
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<TrackEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[async_trait::async_trait]
impl TrackSink for MemorySink {
    async fn send(&self, event: TrackEvent) -> anyhow::Result<TrackResponse> {
        let response = TrackResponse {
            success: true,
            event: event.kind.to_string(),
            slug: event.slug.clone(),
            source: event.source.clone(),
        };
        self.events.lock().push(event);
        Ok(response)
    }
}

/// 总是失败的 Sink
pub struct FailingSink;

#[async_trait::async_trait]
impl TrackSink for FailingSink {
    async fn send(&self, event: TrackEvent) -> anyhow::Result<TrackResponse> {
        anyhow::bail!("tracking backend unavailable for {}", event.slug)
    }
}
