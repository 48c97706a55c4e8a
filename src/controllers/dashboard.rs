//! Admin campaign dashboard: list, create, edit, delete

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::preview::{PreviewRegistry, PreviewUrl};
use crate::client::CampaignClient;
use crate::errors::ReelpageError;
use crate::models::{
    CampaignChanges, CampaignSummary, DEFAULT_WA_BUTTON_LABEL, NewCampaign, PopupTrigger,
    VideoFile,
};
use crate::router::Navigation;
use crate::session::{SessionStore, require_session};

pub const CREATE_FIELDS_REQUIRED: &str = "All fields and files are required.";
pub const UPDATE_FIELDS_REQUIRED: &str = "Slug, WhatsApp Link, and Caption are required for update.";

/// Create / edit form.
#[derive(Debug)]
pub struct CampaignForm {
    pub slug: String,
    pub wa_link: String,
    pub wa_button_label: String,
    pub caption: String,
    pub popup_trigger: Option<PopupTrigger>,
    pub tags: Vec<String>,
    video: Option<VideoFile>,
    preview: Option<PreviewUrl>,
}

impl Default for CampaignForm {
    fn default() -> Self {
        Self {
            slug: String::new(),
            wa_link: String::new(),
            wa_button_label: DEFAULT_WA_BUTTON_LABEL.to_string(),
            caption: String::new(),
            popup_trigger: None,
            tags: Vec::new(),
            video: None,
            preview: None,
        }
    }
}

impl CampaignForm {
    pub fn video(&self) -> Option<&VideoFile> {
        self.video.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewUrl::as_str)
    }

    fn new_campaign(&self) -> NewCampaign {
        NewCampaign {
            slug: self.slug.trim().to_string(),
            wa_link: self.wa_link.trim().to_string(),
            wa_button_label: self.wa_button_label.clone(),
            caption: self.caption.clone(),
            popup_trigger: self.popup_trigger,
            tags: self.tags.clone(),
        }
    }

    fn changes(&self, editing: &str) -> CampaignChanges {
        let mut changes = CampaignChanges::new()
            .wa_link(self.wa_link.trim())
            .wa_button_label(self.wa_button_label.clone())
            .caption(self.caption.clone())
            .popup_trigger(self.popup_trigger)
            .tags(self.tags.clone());
        let slug = self.slug.trim();
        if !slug.is_empty() && slug != editing {
            changes = changes.slug(slug);
        }
        changes
    }
}

pub struct CampaignDashboardController {
    campaigns: CampaignClient,
    sessions: Arc<dyn SessionStore>,
    previews: PreviewRegistry,
    list: Vec<CampaignSummary>,
    form: CampaignForm,
    editing: Option<String>,
    error: Option<String>,
    success: bool,
}

impl CampaignDashboardController {
    pub fn new(campaigns: CampaignClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            campaigns,
            sessions,
            previews: PreviewRegistry::new(),
            list: Vec::new(),
            form: CampaignForm::default(),
            editing: None,
            error: None,
            success: false,
        }
    }

    pub fn campaigns(&self) -> &[CampaignSummary] {
        &self.list
    }

    pub fn form(&self) -> &CampaignForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CampaignForm {
        &mut self.form
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last submit succeeded.
    pub fn succeeded(&self) -> bool {
        self.success
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Session guard, then load the public listing.
    pub async fn enter(&mut self) -> Navigation {
        if require_session(self.sessions.as_ref()).is_err() {
            debug!("Dashboard: no session, redirecting to login");
            return Navigation::to_login();
        }
        self.refresh().await;
        Navigation::Stay
    }

    pub async fn refresh(&mut self) {
        match self.campaigns.list_public().await {
            Ok(list) => {
                debug!("Dashboard: {} campaigns loaded", list.len());
                self.list = list;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to load campaigns: {}", e);
                self.error = Some(e.user_message("Failed to load campaigns"));
            }
        }
    }

    /// Replace the selected video. The previous preview is released.
    pub fn select_video(&mut self, file: Option<VideoFile>) {
        self.form.preview = file.as_ref().map(|f| self.previews.create(&f.file_name));
        self.form.video = file;
    }

    pub async fn submit(&mut self) -> Navigation {
        if self.editing.is_some() {
            self.update().await
        } else {
            self.create().await
        }
    }

    async fn create(&mut self) -> Navigation {
        let form = &self.form;
        if form.slug.trim().is_empty()
            || form.wa_link.trim().is_empty()
            || form.caption.trim().is_empty()
            || form.video.is_none()
        {
            self.error = Some(CREATE_FIELDS_REQUIRED.to_string());
            return Navigation::Stay;
        }

        let fields = form.new_campaign();
        if let Err(e) = fields.validate() {
            self.error = Some(e.message().to_string());
            return Navigation::Stay;
        }

        let Ok(session) = require_session(self.sessions.as_ref()) else {
            return Navigation::to_login();
        };

        self.error = None;
        self.success = false;
        let Some(video) = self.form.video.clone() else {
            return Navigation::Stay;
        };

        match self.campaigns.create(&session, &fields, video).await {
            Ok(campaign) => {
                info!("Dashboard: created {}", campaign.slug);
                self.list.insert(0, CampaignSummary::from(campaign));
                self.reset_form();
                self.success = true;
                Navigation::Stay
            }
            Err(e) => self.fail(e, "Upload failed."),
        }
    }

    async fn update(&mut self) -> Navigation {
        let Some(editing) = self.editing.clone() else {
            return Navigation::Stay;
        };
        if self.form.wa_link.trim().is_empty() || self.form.caption.trim().is_empty() {
            self.error = Some(UPDATE_FIELDS_REQUIRED.to_string());
            return Navigation::Stay;
        }

        let changes = self.form.changes(&editing);
        if let Err(e) = changes.validate() {
            self.error = Some(e.message().to_string());
            return Navigation::Stay;
        }

        let Ok(session) = require_session(self.sessions.as_ref()) else {
            return Navigation::to_login();
        };

        self.error = None;
        self.success = false;
        let video = self.form.video.clone();

        match self
            .campaigns
            .update(&session, &editing, &changes, video)
            .await
        {
            Ok(campaign) => {
                info!("Dashboard: updated {}", campaign.slug);
                if let Some(entry) = self.list.iter_mut().find(|c| c.slug == editing) {
                    entry.merge(&campaign);
                }
                self.cancel_edit();
                self.success = true;
                Navigation::Stay
            }
            Err(e) => self.fail(e, "Update failed."),
        }
    }

    /// Copy a listed campaign into the form and switch to edit mode.
    pub fn edit(&mut self, slug: &str) -> bool {
        let Some(campaign) = self.list.iter().find(|c| c.slug == slug).cloned() else {
            return false;
        };
        self.form = CampaignForm {
            slug: campaign.slug.clone(),
            wa_link: campaign.wa_link.clone(),
            wa_button_label: campaign.wa_button_label.clone(),
            caption: campaign.caption.clone().unwrap_or_default(),
            popup_trigger: campaign.popup_trigger(),
            tags: campaign.tags.clone(),
            video: None,
            preview: None,
        };
        self.editing = Some(campaign.slug);
        self.error = None;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.reset_form();
    }

    pub fn reset_form(&mut self) {
        self.form = CampaignForm::default();
    }

    /// Delete a campaign. The caller is expected to have confirmed with the user.
    pub async fn delete(&mut self, slug: &str) -> Navigation {
        let Ok(session) = require_session(self.sessions.as_ref()) else {
            return Navigation::to_login();
        };

        match self.campaigns.delete(&session, slug).await {
            Ok(confirmation) => {
                debug!("Dashboard: {}", confirmation.message);
                self.list.retain(|c| c.slug != slug);
                self.error = None;
                Navigation::Stay
            }
            Err(e) => self.fail(e, "Delete failed"),
        }
    }

    /// Destroy the stored token and go to login.
    pub fn logout(&mut self) -> Navigation {
        if let Err(e) = self.sessions.clear() {
            warn!("Failed to clear session: {}", e);
        }
        Navigation::to_login()
    }

    fn fail(&mut self, err: ReelpageError, fallback: &str) -> Navigation {
        if err.is_auth() {
            return Navigation::to_login();
        }
        self.error = Some(err.user_message(fallback));
        Navigation::Stay
    }
}
