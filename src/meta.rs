//! Social-preview meta tags for a campaign landing page

use std::fmt::Write as _;

use crate::models::Campaign;

/// Whether a tag is keyed by `property` (Open Graph) or `name` (Twitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Property,
    Name,
}

impl MetaKey {
    fn attr(self) -> &'static str {
        match self {
            MetaKey::Property => "property",
            MetaKey::Name => "name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub key: MetaKey,
    pub id: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
}

impl MetaTags {
    pub fn from_campaign(campaign: &Campaign, site_url: &str) -> Self {
        Self {
            title: campaign.slug.clone(),
            description: campaign.caption.clone().unwrap_or_default(),
            image: campaign.full_thumbnail_url.trim().to_string(),
            url: landing_url(site_url, &campaign.slug),
        }
    }

    /// Tags in emission order.
    pub fn tags(&self) -> Vec<MetaTag> {
        let tag = |key, id, content: &str| MetaTag {
            key,
            id,
            content: content.to_string(),
        };
        vec![
            tag(MetaKey::Property, "og:title", &self.title),
            tag(MetaKey::Property, "og:description", &self.description),
            tag(MetaKey::Property, "og:image", &self.image),
            tag(MetaKey::Property, "og:url", &self.url),
            tag(MetaKey::Property, "og:type", "video.other"),
            tag(MetaKey::Name, "twitter:card", "summary_large_image"),
            tag(MetaKey::Name, "twitter:title", &self.title),
            tag(MetaKey::Name, "twitter:description", &self.description),
            tag(MetaKey::Name, "twitter:image", &self.image),
        ]
    }

    /// One `<meta>` element per line.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        for tag in self.tags() {
            let _ = writeln!(
                out,
                r#"<meta {}="{}" content="{}">"#,
                tag.key.attr(),
                tag.id,
                escape_attr(&tag.content)
            );
        }
        out
    }
}

/// Public landing page URL for a slug.
pub fn landing_url(site_url: &str, slug: &str) -> String {
    format!(
        "{}/campaigns/{}",
        site_url.trim_end_matches('/'),
        urlencoding::encode(slug)
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn campaign(caption: Option<&str>) -> Campaign {
        serde_json::from_value(json!({
            "slug": "summer sale",
            "fullThumbnailUrl": "  https://cdn.test/thumb.jpg \n",
            "caption": caption,
        }))
        .unwrap()
    }

    #[test]
    fn test_from_campaign_fields() {
        let tags = MetaTags::from_campaign(&campaign(Some("Hot deals")), "https://site.test/");
        assert_eq!(tags.title, "summer sale");
        assert_eq!(tags.description, "Hot deals");
        assert_eq!(tags.image, "https://cdn.test/thumb.jpg");
        assert_eq!(tags.url, "https://site.test/campaigns/summer%20sale");
    }

    #[test]
    fn test_missing_caption_is_empty_description() {
        let tags = MetaTags::from_campaign(&campaign(None), "https://site.test");
        assert_eq!(tags.description, "");
    }

    #[test]
    fn test_tag_set() {
        let tags = MetaTags::from_campaign(&campaign(Some("c")), "https://site.test").tags();
        let ids: Vec<_> = tags.iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![
                "og:title",
                "og:description",
                "og:image",
                "og:url",
                "og:type",
                "twitter:card",
                "twitter:title",
                "twitter:description",
                "twitter:image",
            ]
        );
        let og_type = tags.iter().find(|t| t.id == "og:type").unwrap();
        assert_eq!(og_type.content, "video.other");
        let card = tags.iter().find(|t| t.id == "twitter:card").unwrap();
        assert_eq!(card.key, MetaKey::Name);
        assert_eq!(card.content, "summary_large_image");
    }

    #[test]
    fn test_render_html_escapes() {
        let html = MetaTags::from_campaign(
            &campaign(Some(r#"Say "hi" <now> & 'later'"#)),
            "https://site.test",
        )
        .render_html();
        assert!(html.contains(
            r#"<meta property="og:description" content="Say &quot;hi&quot; &lt;now&gt; &amp; &#39;later&#39;">"#
        ));
        assert_eq!(html.lines().count(), 9);
    }
}
