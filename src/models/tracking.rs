//! Tracking event types

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// 埋点事件类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    View,
    Play,
    Complete,
    Click,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "play" => Ok(Self::Play),
            "complete" => Ok(Self::Complete),
            "click" => Ok(Self::Click),
            _ => Err(format!(
                "Invalid event kind: '{}'. Valid: view, play, complete, click",
                s
            )),
        }
    }
}

/// A single analytics ping. Never persisted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackEvent {
    pub kind: EventKind,
    pub slug: String,
    pub source: String,
}

impl TrackEvent {
    pub fn new(kind: EventKind, slug: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind,
            slug: slug.into(),
            source: source.into(),
        }
    }
}

/// 后端确认
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub success: bool,
    pub event: String,
    pub slug: String,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_event_kind_round_trips_through_str() {
        for kind in EventKind::iter() {
            assert_eq!(kind.to_string().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_event_kind_path_segments() {
        assert_eq!(EventKind::View.as_ref(), "view");
        assert_eq!(EventKind::Complete.as_ref(), "complete");
        assert!("share".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_track_response_deserialize() {
        let resp: TrackResponse = serde_json::from_str(
            r#"{"success":true,"event":"view","slug":"demo","source":"direct"}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.event, "view");
    }
}
