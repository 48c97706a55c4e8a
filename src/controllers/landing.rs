//! Public campaign landing page

use tracing::{debug, info};

use crate::client::CampaignClient;
use crate::meta::MetaTags;
use crate::models::{Campaign, EventKind};
use crate::tracking::{PageTracker, Tracker};

pub const MISSING_SLUG: &str = "Missing slug";
pub const CAMPAIGN_NOT_FOUND: &str = "Campaign not found";

#[derive(Debug, Clone, PartialEq)]
pub struct LandingView {
    pub campaign: Campaign,
    pub meta: MetaTags,
    /// Full video shown instead of the teaser frame
    pub show_full: bool,
    popup_shown: bool,
}

impl LandingView {
    pub fn popup_shown(&self) -> bool {
        self.popup_shown
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LandingState {
    Loading,
    Ready(Box<LandingView>),
    /// Terminal for this instance
    Error(String),
}

pub struct LandingController {
    campaigns: CampaignClient,
    tracker: PageTracker,
    site_url: String,
    state: LandingState,
}

impl LandingController {
    /// `tracker` should already carry the URL-derived source as its default.
    pub fn new(campaigns: CampaignClient, tracker: Tracker, site_url: impl Into<String>) -> Self {
        Self {
            campaigns,
            tracker: PageTracker::new(tracker),
            site_url: site_url.into(),
            state: LandingState::Loading,
        }
    }

    pub fn state(&self) -> &LandingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LandingState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LandingState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<&LandingView> {
        match &self.state {
            LandingState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.view().map(|v| &v.campaign)
    }

    pub fn meta(&self) -> Option<&MetaTags> {
        self.view().map(|v| &v.meta)
    }

    fn view_mut(&mut self) -> Option<&mut LandingView> {
        match &mut self.state {
            LandingState::Ready(view) => Some(view),
            _ => None,
        }
    }

    /// Fetch the campaign for `slug`. Reloading a ready page refreshes the
    /// campaign without a second view event.
    pub async fn load(&mut self, slug: &str) {
        if matches!(self.state, LandingState::Error(_)) {
            debug!("Landing page in error state; ignoring load for {}", slug);
            return;
        }

        let slug = slug.trim();
        if slug.is_empty() {
            self.state = LandingState::Error(MISSING_SLUG.to_string());
            return;
        }

        match self.campaigns.get(slug).await {
            Ok(campaign) => {
                let meta = MetaTags::from_campaign(&campaign, &self.site_url);
                let (show_full, popup_shown) = self
                    .view()
                    .map(|v| (v.show_full, v.popup_shown))
                    .unwrap_or_default();
                self.tracker.track_once(EventKind::View, &campaign.slug);
                info!("Landing page ready: {}", campaign.slug);
                self.state = LandingState::Ready(Box::new(LandingView {
                    campaign,
                    meta,
                    show_full,
                    popup_shown,
                }));
            }
            Err(e) => {
                debug!("Failed to load campaign {}: {}", slug, e);
                let message = e.backend_message().unwrap_or(CAMPAIGN_NOT_FOUND);
                self.state = LandingState::Error(message.to_string());
            }
        }
    }

    pub fn switch_to_full(&mut self) {
        if let Some(view) = self.view_mut() {
            view.show_full = true;
        }
    }

    /// Video started. Reported once per page.
    pub fn on_play(&mut self) -> bool {
        self.track(EventKind::Play)
    }

    /// Video reached the end. Reported once per page.
    pub fn on_complete(&mut self) -> bool {
        self.track(EventKind::Complete)
    }

    /// Playback progress. Returns `true` the first time the popup trigger is due.
    pub fn on_progress(&mut self, position: f64, duration: f64) -> bool {
        let Some(view) = self.view_mut() else {
            return false;
        };
        if view.popup_shown {
            return false;
        }
        let due = view
            .campaign
            .popup_trigger()
            .is_some_and(|t| t.is_due(position, duration));
        if due {
            view.popup_shown = true;
        }
        due
    }

    /// CTA pressed: report the click and hand back the WhatsApp link.
    pub fn on_cta_click(&mut self) -> Option<String> {
        let link = self.campaign().map(|c| c.wa_link.clone())?;
        self.track(EventKind::Click);
        Some(link)
    }

    fn track(&mut self, kind: EventKind) -> bool {
        let Some(slug) = self.campaign().map(|c| c.slug.clone()) else {
            return false;
        };
        self.tracker.track_once(kind, &slug)
    }

    /// Await emissions spawned so far.
    pub async fn settle(&self) {
        self.tracker.settle().await;
    }
}
