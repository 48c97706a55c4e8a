//! Traffic source attribution from the landing URL

use url::Url;

pub const DIRECT_SOURCE: &str = "direct";

/// `utm_source`, then `source`, then `"direct"`. Empty values are skipped.
pub fn resolve_source(url: &Url) -> String {
    let lookup = |key: &str| {
        url.query_pairs()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.into_owned())
    };

    lookup("utm_source")
        .or_else(|| lookup("source"))
        .unwrap_or_else(|| DIRECT_SOURCE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_of(url: &str) -> String {
        resolve_source(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_utm_source_wins() {
        assert_eq!(
            source_of("https://x.test/campaigns/a?source=ig&utm_source=newsletter"),
            "newsletter"
        );
    }

    #[test]
    fn test_source_fallback() {
        assert_eq!(source_of("https://x.test/campaigns/a?source=ig"), "ig");
        assert_eq!(source_of("https://x.test/campaigns/a?utm_source=&source=ig"), "ig");
    }

    #[test]
    fn test_direct_default() {
        assert_eq!(source_of("https://x.test/campaigns/a"), "direct");
        assert_eq!(source_of("https://x.test/campaigns/a?utm_source="), "direct");
    }

    #[test]
    fn test_percent_decoded() {
        assert_eq!(source_of("https://x.test/?utm_source=spring%20promo"), "spring promo");
    }
}
