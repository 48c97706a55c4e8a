//! Slug 校验

use crate::errors::ReelpageError;

/// 与后端路由保持一致的最大长度
pub const MAX_SLUG_LENGTH: usize = 128;

/// A slug must be non-empty, URL-safe (`[A-Za-z0-9_-]`) and at most
/// [`MAX_SLUG_LENGTH`] characters.
pub fn validate_slug(slug: &str) -> Result<(), ReelpageError> {
    if slug.is_empty() {
        return Err(ReelpageError::validation("Slug is required"));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(ReelpageError::validation(format!(
            "Slug must be at most {} characters",
            MAX_SLUG_LENGTH
        )));
    }
    if let Some(bad) = slug
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ReelpageError::validation(format!(
            "Slug contains invalid character '{}'; use letters, digits, '-' or '_'",
            bad
        )));
    }
    Ok(())
}
