//! Wire and domain types shared by the client layer and the controllers.

pub mod analytics;
pub mod campaign;
pub mod tracking;

pub use analytics::{AnalyticsDetail, AnalyticsSummary, DateRange, DateStats, EventCounts};
pub use campaign::{
    Campaign, CampaignChanges, CampaignSummary, DEFAULT_WA_BUTTON_LABEL, DeleteConfirmation,
    NewCampaign, PopupTrigger, PopupTriggerType, ShareLinks, SharePlatform, VideoFile,
};
pub use tracking::{EventKind, TrackEvent, TrackResponse};
