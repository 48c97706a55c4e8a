//! Campaign resource client

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::errors::{ReelpageError, Result};
use crate::models::{
    Campaign, CampaignChanges, CampaignSummary, DeleteConfirmation, NewCampaign, ShareLinks,
    VideoFile,
};
use crate::session::Session;

use super::{ApiClient, slug_segment};

/// Multipart part name carrying the video.
const VIDEO_PART: &str = "full";

/// Campaign CRUD plus the public listing and share links.
///
/// Mutating calls take the session read by the caller immediately before the
/// call; nothing is cached here.
#[derive(Debug, Clone)]
pub struct CampaignClient {
    api: ApiClient,
}

impl CampaignClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Upload a new campaign with its video.
    pub async fn create(
        &self,
        session: &Session,
        fields: &NewCampaign,
        video: VideoFile,
    ) -> Result<Campaign> {
        fields.validate()?;
        if video.is_empty() {
            return Err(ReelpageError::validation("Video file is empty"));
        }

        let form = build_form(fields.form_fields(), video)?;
        let request = self
            .api
            .request(Method::POST, "/campaigns/upload", Some(session))
            .multipart(form);

        let campaign: Campaign = self.api.send(request).await?;
        info!("Campaign created: {}", campaign.slug);
        Ok(campaign)
    }

    pub async fn get(&self, slug: &str) -> Result<Campaign> {
        let path = format!("/campaigns/{}", slug_segment(slug));
        let request = self.api.request(Method::GET, &path, None);
        self.api.send(request).await
    }

    /// Partial update. JSON when no file accompanies the change, multipart otherwise.
    pub async fn update(
        &self,
        session: &Session,
        slug: &str,
        changes: &CampaignChanges,
        video: Option<VideoFile>,
    ) -> Result<Campaign> {
        changes.validate()?;
        let path = format!("/campaigns/{}", slug_segment(slug));
        let request = self.api.request(Method::PUT, &path, Some(session));

        let request = match video {
            Some(video) => {
                debug!("Updating {} with video replacement ({} bytes)", slug, video.len());
                request.multipart(build_form(changes.form_fields(), video)?)
            }
            None => request.json(&changes.to_json()),
        };

        let campaign: Campaign = self.api.send(request).await?;
        info!("Campaign updated: {}", campaign.slug);
        Ok(campaign)
    }

    pub async fn delete(&self, session: &Session, slug: &str) -> Result<DeleteConfirmation> {
        let path = format!("/campaigns/{}", slug_segment(slug));
        let request = self.api.request(Method::DELETE, &path, Some(session));
        let confirmation: DeleteConfirmation = self.api.send(request).await?;
        info!("Campaign deleted: {}", confirmation.slug);
        Ok(confirmation)
    }

    /// Public listing, no session required.
    pub async fn list_public(&self) -> Result<Vec<CampaignSummary>> {
        let request = self.api.request(Method::GET, "/campaigns/public/links", None);
        self.api.send(request).await
    }

    pub async fn share_links(&self, slug: &str) -> Result<ShareLinks> {
        let path = format!("/campaigns/{}/share-links", slug_segment(slug));
        let request = self.api.request(Method::GET, &path, None);
        self.api.send(request).await
    }
}

fn build_form(fields: Vec<(&'static str, String)>, video: VideoFile) -> Result<Form> {
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value));

    let part = Part::bytes(video.bytes)
        .file_name(video.file_name)
        .mime_str(&video.content_type)
        .map_err(|e| ReelpageError::validation(format!("Invalid video content type: {}", e)))?;

    Ok(form.part(VIDEO_PART, part))
}
