//! WhatsApp 链接校验

use url::Url;

use crate::errors::ReelpageError;

/// Hosts that open a WhatsApp chat directly.
const WHATSAPP_HOSTS: &[&str] = &["wa.me", "api.whatsapp.com", "web.whatsapp.com"];

/// Check the call-to-action link shown on a landing page.
///
/// Any absolute http(s) URL with a host is accepted; `javascript:`, `data:` and
/// similar schemes fail the scheme check.
pub fn validate_wa_link(link: &str) -> Result<(), ReelpageError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(ReelpageError::validation("WhatsApp link is required"));
    }

    let url = Url::parse(link).map_err(|e| {
        ReelpageError::validation(format!("WhatsApp link is not a valid URL: {}", e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ReelpageError::validation(format!(
            "WhatsApp link must use http:// or https://, got {}:",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ReelpageError::validation("WhatsApp link has no host"));
    }
    Ok(())
}

/// Whether `link` points at a WhatsApp chat host rather than a custom redirect.
pub fn is_whatsapp_link(link: &str) -> bool {
    Url::parse(link.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| WHATSAPP_HOSTS.contains(&host.as_str()))
}
