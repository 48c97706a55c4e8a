//! Campaign 数据模型
//!
//! 字段与后端 JSON 保持一致（camelCase）。

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumIter};

use crate::errors::{ReelpageError, Result};

/// WhatsApp 按钮默认文案
pub const DEFAULT_WA_BUTTON_LABEL: &str = "Chat on WhatsApp";

/// Popup 触发方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PopupTriggerType {
    /// 播放 N 秒后弹出
    Seconds,
    /// 播放到百分之 N 时弹出
    Percent,
}

impl std::fmt::Display for PopupTriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl std::str::FromStr for PopupTriggerType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "seconds" | "s" => Ok(Self::Seconds),
            "percent" | "%" => Ok(Self::Percent),
            _ => Err(format!(
                "Invalid popup trigger type: '{}'. Valid: seconds, percent",
                s
            )),
        }
    }
}

/// 完整的 popup 触发配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupTrigger {
    pub kind: PopupTriggerType,
    pub value: f64,
}

impl PopupTrigger {
    pub fn seconds(value: f64) -> Self {
        Self {
            kind: PopupTriggerType::Seconds,
            value,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            kind: PopupTriggerType::Percent,
            value,
        }
    }

    /// Whether the popup should be visible at `position` seconds into a video
    /// lasting `duration` seconds.
    ///
    /// Percent triggers never fire while the duration is unknown (zero or NaN).
    pub fn is_due(&self, position: f64, duration: f64) -> bool {
        match self.kind {
            PopupTriggerType::Seconds => position >= self.value,
            PopupTriggerType::Percent => {
                if duration.is_nan() || duration <= 0.0 {
                    return false;
                }
                position / duration * 100.0 >= self.value
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(ReelpageError::validation(
                "Popup trigger value must be a non-negative number",
            ));
        }
        if self.kind == PopupTriggerType::Percent && self.value > 100.0 {
            return Err(ReelpageError::validation(
                "Popup trigger percent must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for PopupTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            PopupTriggerType::Seconds => write!(f, "after {}s", self.value),
            PopupTriggerType::Percent => write!(f, "at {}%", self.value),
        }
    }
}

impl std::str::FromStr for PopupTrigger {
    type Err = String;

    /// 解析 `seconds:5` / `percent:50` / `5s` / `50%`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, value) = if let Some((kind, value)) = s.split_once(':') {
            (kind.parse::<PopupTriggerType>()?, value)
        } else if let Some(value) = s.strip_suffix('%') {
            (PopupTriggerType::Percent, value)
        } else if let Some(value) = s.strip_suffix('s') {
            (PopupTriggerType::Seconds, value)
        } else {
            return Err(format!(
                "Invalid popup trigger: '{}'. Use seconds:N, percent:N, Ns or N%",
                s
            ));
        };
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("Invalid popup trigger value: '{}'", value))?;
        Ok(Self { kind, value })
    }
}

fn split_trigger(trigger: Option<PopupTrigger>) -> (Option<PopupTriggerType>, Option<f64>) {
    match trigger {
        Some(t) => (Some(t.kind), Some(t.value)),
        None => (None, None),
    }
}

fn join_trigger(kind: Option<PopupTriggerType>, value: Option<f64>) -> Option<PopupTrigger> {
    match (kind, value) {
        (Some(kind), Some(value)) => Some(PopupTrigger { kind, value }),
        _ => None,
    }
}

/// 后端返回的完整 campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub slug: String,
    #[serde(default)]
    pub full_video_url: String,
    #[serde(default)]
    pub full_thumbnail_url: String,
    #[serde(default)]
    pub wa_link: String,
    #[serde(default)]
    pub wa_button_label: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub popup_trigger_type: Option<PopupTriggerType>,
    #[serde(default)]
    pub popup_trigger_value: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Campaign {
    pub fn popup_trigger(&self) -> Option<PopupTrigger> {
        join_trigger(self.popup_trigger_type, self.popup_trigger_value)
    }

    /// 按钮文案，后端未设置时使用默认值
    pub fn button_label(&self) -> &str {
        if self.wa_button_label.trim().is_empty() {
            DEFAULT_WA_BUTTON_LABEL
        } else {
            &self.wa_button_label
        }
    }
}

/// 公开列表中的 campaign 摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub slug: String,
    #[serde(default)]
    pub full_video_url: String,
    #[serde(default)]
    pub full_thumbnail_url: String,
    #[serde(default)]
    pub wa_link: String,
    #[serde(default)]
    pub wa_button_label: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub popup_trigger_type: Option<PopupTriggerType>,
    #[serde(default)]
    pub popup_trigger_value: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CampaignSummary {
    pub fn popup_trigger(&self) -> Option<PopupTrigger> {
        join_trigger(self.popup_trigger_type, self.popup_trigger_value)
    }

    /// Overlay a freshly returned campaign onto this summary.
    pub fn merge(&mut self, campaign: &Campaign) {
        *self = CampaignSummary::from(campaign.clone());
    }
}

impl From<Campaign> for CampaignSummary {
    fn from(c: Campaign) -> Self {
        Self {
            slug: c.slug,
            full_video_url: c.full_video_url,
            full_thumbnail_url: c.full_thumbnail_url,
            wa_link: c.wa_link,
            wa_button_label: c.wa_button_label,
            caption: c.caption,
            popup_trigger_type: c.popup_trigger_type,
            popup_trigger_value: c.popup_trigger_value,
            tags: c.tags,
        }
    }
}

/// 创建 campaign 的表单字段
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampaign {
    pub slug: String,
    pub wa_link: String,
    pub wa_button_label: String,
    pub caption: String,
    pub popup_trigger: Option<PopupTrigger>,
    pub tags: Vec<String>,
}

impl NewCampaign {
    pub fn new(slug: impl Into<String>, wa_link: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            wa_link: wa_link.into(),
            wa_button_label: DEFAULT_WA_BUTTON_LABEL.to_string(),
            caption: caption.into(),
            popup_trigger: None,
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        crate::utils::validate_slug(&self.slug)?;
        crate::utils::validate_wa_link(&self.wa_link)?;
        if self.caption.trim().is_empty() {
            return Err(ReelpageError::validation("Caption is required"));
        }
        if let Some(trigger) = &self.popup_trigger {
            trigger.validate()?;
        }
        Ok(())
    }

    /// Multipart text fields in upload order. Empty tag lists and an absent
    /// popup trigger are omitted entirely.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("slug", self.slug.clone()),
            ("waLink", self.wa_link.clone()),
            ("waButtonLabel", self.wa_button_label.clone()),
            ("caption", self.caption.clone()),
        ];
        let (kind, value) = split_trigger(self.popup_trigger);
        if let Some(kind) = kind {
            fields.push(("popupTriggerType", kind.to_string()));
        }
        if let Some(value) = value {
            fields.push(("popupTriggerValue", value.to_string()));
        }
        if !self.tags.is_empty() {
            fields.push((
                "tags",
                serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".to_string()),
            ));
        }
        fields
    }
}

/// Partial update. `None` leaves a field untouched.
///
/// `popup_trigger: Some(None)` clears the trigger on the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignChanges {
    pub slug: Option<String>,
    pub wa_link: Option<String>,
    pub wa_button_label: Option<String>,
    pub caption: Option<String>,
    pub popup_trigger: Option<Option<PopupTrigger>>,
    pub tags: Option<Vec<String>>,
}

impl CampaignChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn wa_link(mut self, wa_link: impl Into<String>) -> Self {
        self.wa_link = Some(wa_link.into());
        self
    }

    pub fn wa_button_label(mut self, label: impl Into<String>) -> Self {
        self.wa_button_label = Some(label.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn popup_trigger(mut self, trigger: Option<PopupTrigger>) -> Self {
        self.popup_trigger = Some(trigger);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(slug) = &self.slug {
            crate::utils::validate_slug(slug)?;
        }
        if let Some(link) = &self.wa_link {
            crate::utils::validate_wa_link(link)?;
        }
        if let Some(Some(trigger)) = &self.popup_trigger {
            trigger.validate()?;
        }
        Ok(())
    }

    fn entries(&self) -> Vec<(&'static str, Value)> {
        let mut entries = Vec::new();
        if let Some(v) = &self.slug {
            entries.push(("slug", Value::from(v.clone())));
        }
        if let Some(v) = &self.wa_link {
            entries.push(("waLink", Value::from(v.clone())));
        }
        if let Some(v) = &self.wa_button_label {
            entries.push(("waButtonLabel", Value::from(v.clone())));
        }
        if let Some(v) = &self.caption {
            entries.push(("caption", Value::from(v.clone())));
        }
        if let Some(trigger) = &self.popup_trigger {
            let (kind, value) = split_trigger(*trigger);
            entries.push((
                "popupTriggerType",
                kind.map(|k| Value::from(k.to_string())).unwrap_or(Value::Null),
            ));
            entries.push((
                "popupTriggerValue",
                value.map(Value::from).unwrap_or(Value::Null),
            ));
        }
        if let Some(tags) = &self.tags {
            entries.push(("tags", Value::from(tags.clone())));
        }
        entries
    }

    /// JSON body for a file-less update. Cleared fields are sent as `null`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Value::Object(map)
    }

    /// Multipart text fields for an update carrying a new video.
    ///
    /// Nulls are skipped and arrays are JSON-encoded.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        self.entries()
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k, s)),
                Value::Number(n) => n.as_f64().map(|f| (k, f.to_string())),
                other => Some((k, other.to_string())),
            })
            .collect()
    }
}

/// 待上传的视频文件
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl VideoFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_video_mime(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ReelpageError::file_operation(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video.mp4")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_video_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "ogv" | "ogg" => "video/ogg",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
}

/// DELETE 返回的确认信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
    pub slug: String,
}

/// 分享平台
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharePlatform {
    pub name: String,
    pub label: String,
    pub url: String,
}

/// 分享链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinks {
    pub campaign_slug: String,
    pub base_url: String,
    #[serde(default)]
    pub share_links: HashMap<String, String>,
    #[serde(default)]
    pub platforms: Vec<SharePlatform>,
}
