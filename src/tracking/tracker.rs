//! 埋点发送器
//!
//! - 发送在 tokio 上 spawn，调用方从不等待
//! - 失败只记录日志，不重试
//! - view / play / complete 每个页面实例每个 (campaign, kind) 至多一次

use std::sync::Arc;

use dashmap::DashSet;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::TrackSink;
use super::source::DIRECT_SOURCE;
use crate::models::{EventKind, TrackEvent};

/// Fire-and-forget emitter over a [`TrackSink`].
#[derive(Clone)]
pub struct Tracker {
    sink: Arc<dyn TrackSink>,
    default_source: String,
}

impl Tracker {
    pub fn new(sink: Arc<dyn TrackSink>) -> Self {
        Self {
            sink,
            default_source: DIRECT_SOURCE.to_string(),
        }
    }

    /// Source used when an emitter is called without one.
    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        if !source.is_empty() {
            self.default_source = source;
        }
        self
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// Spawn one emission and return immediately.
    pub fn emit(&self, kind: EventKind, slug: &str, source: Option<&str>) -> JoinHandle<()> {
        let source = source
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.default_source);
        let event = TrackEvent::new(kind, slug, source);
        let sink = Arc::clone(&self.sink);

        trace!("Tracker: spawning {} for {}", event.kind, event.slug);
        tokio::spawn(async move {
            let kind = event.kind;
            let slug = event.slug.clone();
            match sink.send(event).await {
                Ok(resp) => debug!(
                    "Tracked {} for {} (source: {}, success: {})",
                    kind, slug, resp.source, resp.success
                ),
                Err(e) => warn!("Failed to track {} for {}: {}", kind, slug, e),
            }
        })
    }

    pub fn track_view(&self, slug: &str, source: Option<&str>) -> JoinHandle<()> {
        self.emit(EventKind::View, slug, source)
    }

    pub fn track_play(&self, slug: &str, source: Option<&str>) -> JoinHandle<()> {
        self.emit(EventKind::Play, slug, source)
    }

    pub fn track_complete(&self, slug: &str, source: Option<&str>) -> JoinHandle<()> {
        self.emit(EventKind::Complete, slug, source)
    }

    pub fn track_click(&self, slug: &str, source: Option<&str>) -> JoinHandle<()> {
        self.emit(EventKind::Click, slug, source)
    }
}

/// Already-sent set keyed by (campaign, event kind).
#[derive(Default)]
pub struct SentEvents {
    sent: DashSet<(String, EventKind)>,
}

impl SentEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a pair is seen.
    pub fn mark(&self, slug: &str, kind: EventKind) -> bool {
        self.sent.insert((slug.to_string(), kind))
    }

    pub fn contains(&self, slug: &str, kind: EventKind) -> bool {
        self.sent.contains(&(slug.to_string(), kind))
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}

/// Tracker scoped to one page lifetime.
///
/// Keeps the de-dup set and the handles of in-flight emissions so the owner
/// can [`settle`](Self::settle) them before teardown.
pub struct PageTracker {
    tracker: Tracker,
    sent: SentEvents,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl PageTracker {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            sent: SentEvents::new(),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Emit `kind` unless already sent for this slug. Clicks are never de-duplicated.
    pub fn track_once(&self, kind: EventKind, slug: &str) -> bool {
        if kind != EventKind::Click && !self.sent.mark(slug, kind) {
            trace!("PageTracker: {} for {} already sent", kind, slug);
            return false;
        }
        let handle = self.tracker.emit(kind, slug, None);
        self.pending.lock().push(handle);
        true
    }

    pub fn already_sent(&self, slug: &str, kind: EventKind) -> bool {
        self.sent.contains(slug, kind)
    }

    pub fn source(&self) -> &str {
        self.tracker.default_source()
    }

    /// Wait for every emission spawned so far.
    pub async fn settle(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.pending.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                debug!("Tracking task ended abnormally: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{FailingSink, MemorySink};

    #[tokio::test]
    async fn test_emit_uses_default_source() {
        let sink = Arc::new(MemorySink::new());
        let tracker = Tracker::new(sink.clone()).with_default_source("newsletter");

        tracker.track_view("demo", None).await.unwrap();
        tracker.track_play("demo", Some("ig")).await.unwrap();
        tracker.track_click("demo", Some("")).await.unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].source, "newsletter");
        assert_eq!(events[1].source, "ig");
        assert_eq!(events[2].source, "newsletter");
    }

    #[tokio::test]
    async fn test_emit_failure_is_swallowed() {
        let tracker = Tracker::new(Arc::new(FailingSink));
        // 任务正常结束，不 panic
        tracker.track_complete("demo", None).await.unwrap();
    }

    #[test]
    fn test_sent_events_mark() {
        let sent = SentEvents::new();
        assert!(sent.mark("a", EventKind::Play));
        assert!(!sent.mark("a", EventKind::Play));
        assert!(sent.mark("a", EventKind::View));
        assert!(sent.mark("b", EventKind::Play));
        assert_eq!(sent.len(), 3);
    }

    #[tokio::test]
    async fn test_page_tracker_dedups_except_clicks() {
        let sink = Arc::new(MemorySink::new());
        let page = PageTracker::new(Tracker::new(sink.clone()));

        assert!(page.track_once(EventKind::Play, "demo"));
        assert!(!page.track_once(EventKind::Play, "demo"));
        assert!(page.track_once(EventKind::Complete, "demo"));
        assert!(!page.track_once(EventKind::Complete, "demo"));
        assert!(page.track_once(EventKind::Click, "demo"));
        assert!(page.track_once(EventKind::Click, "demo"));
        page.settle().await;

        let kinds: Vec<_> = sink.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == EventKind::Play).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == EventKind::Complete).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == EventKind::Click).count(), 2);
    }
}
