//! URL-based social platform classification.

use serde::{Deserialize, Serialize};

/// Social network a post URL belongs to.
///
/// Serialized as a lowercase tag. Any unrecognized tag deserializes to
/// [`Platform::Unknown`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Platform {
    Twitter,
    Instagram,
    TikTok,
    YouTube,
    LinkedIn,
    Facebook,
    Unknown,
}

/// Domain fragments checked in priority order. The first hit wins.
const DOMAIN_TABLE: &[(&[&str], Platform)] = &[
    (&["twitter.com", "x.com"], Platform::Twitter),
    (&["instagram.com"], Platform::Instagram),
    (&["tiktok.com"], Platform::TikTok),
    (&["youtube.com", "youtu.be"], Platform::YouTube),
    (&["linkedin.com"], Platform::LinkedIn),
    (&["facebook.com"], Platform::Facebook),
];

/// Classify a URL by case-insensitive substring match against known domains.
///
/// Never fails: empty or unrecognized input yields [`Platform::Unknown`].
/// Cheap enough to run on every keystroke.
#[must_use]
pub fn detect_platform(url: &str) -> Platform {
    let lower = url.to_lowercase();
    DOMAIN_TABLE
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map_or(Platform::Unknown, |(_, platform)| *platform)
}

impl Platform {
    /// Every variant, `Unknown` last.
    pub const ALL: [Platform; 7] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::TikTok,
        Platform::YouTube,
        Platform::LinkedIn,
        Platform::Facebook,
        Platform::Unknown,
    ];

    /// The lowercase tag used in storage, archives, and the API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::YouTube => "youtube",
            Platform::LinkedIn => "linkedin",
            Platform::Facebook => "facebook",
            Platform::Unknown => "unknown",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Twitter => "X (Twitter)",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::YouTube => "YouTube",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
            Platform::Unknown => "Unknown",
        }
    }

    /// Parse a tag, coercing anything unrecognized to [`Platform::Unknown`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or(Platform::Unknown)
    }
}

impl From<String> for Platform {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instagram_matches_regardless_of_case_subdomain_or_path() {
        for url in [
            "https://www.instagram.com/p/Cxyz123/",
            "HTTPS://INSTAGRAM.COM/reel/abc",
            "m.Instagram.com/stories/someone/1?igsh=1",
            "instagram.com",
        ] {
            assert_eq!(detect_platform(url), Platform::Instagram, "url: {url}");
        }
    }

    #[test]
    fn each_known_domain_maps_to_its_platform() {
        let cases = [
            ("https://twitter.com/jack/status/20", Platform::Twitter),
            ("https://x.com/jack/status/20", Platform::Twitter),
            ("https://www.tiktok.com/@user/video/1", Platform::TikTok),
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", Platform::YouTube),
            ("https://youtu.be/dQw4w9WgXcQ", Platform::YouTube),
            ("https://www.linkedin.com/posts/someone", Platform::LinkedIn),
            ("https://www.facebook.com/page/posts/1", Platform::Facebook),
        ];
        for (url, expected) in cases {
            assert_eq!(detect_platform(url), expected, "url: {url}");
        }
    }

    #[test]
    fn unknown_domain_is_unknown() {
        assert_eq!(
            detect_platform("https://example.org/post/1"),
            Platform::Unknown
        );
    }

    #[test]
    fn empty_input_is_unknown() {
        assert_eq!(detect_platform(""), Platform::Unknown);
    }

    #[test]
    fn earlier_table_entries_take_priority() {
        // Contains both an x.com fragment and instagram.com; Twitter is checked first.
        assert_eq!(
            detect_platform("https://instagram.com/redirect?to=x.com"),
            Platform::Twitter
        );
    }

    #[test]
    fn parse_coerces_unknown_tags() {
        assert_eq!(Platform::parse("tiktok"), Platform::TikTok);
        assert_eq!(Platform::parse(" YouTube "), Platform::YouTube);
        assert_eq!(Platform::parse("mastodon"), Platform::Unknown);
        assert_eq!(Platform::parse(""), Platform::Unknown);
    }

    #[test]
    fn serde_uses_lowercase_tags_and_tolerates_unknown() {
        assert_eq!(
            serde_json::to_string(&Platform::LinkedIn).unwrap(),
            "\"linkedin\""
        );
        let parsed: Platform = serde_json::from_str("\"threads\"").unwrap();
        assert_eq!(parsed, Platform::Unknown);
        let parsed: Platform = serde_json::from_str("\"tiktok\"").unwrap();
        assert_eq!(parsed, Platform::TikTok);
    }
}
