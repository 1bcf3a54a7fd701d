//! The analyzed post record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Primary media carried by a post.
///
/// Unrecognized values (from the model or from stored history) become
/// [`MediaType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MediaType {
    Video,
    Image,
    Text,
    #[default]
    Unknown,
}

impl MediaType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Image => "image",
            MediaType::Text => "text",
            MediaType::Unknown => "unknown",
        }
    }

    /// Case-insensitive parse; anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "video" => MediaType::Video,
            "image" => MediaType::Image,
            "text" => MediaType::Text,
            _ => MediaType::Unknown,
        }
    }
}

impl From<String> for MediaType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of analyzing one social-media URL.
///
/// Records are never edited after creation; re-analyzing a URL produces a new
/// record with a new `id`. The JSON form uses camelCase keys so persisted
/// history and exported archives share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub url: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl Post {
    /// First eight characters of the id, used in archive names and listings.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map_or(self.id.len(), |(idx, _)| idx);
        &self.id[..end]
    }

    /// Hashtags rendered with a single leading `#`.
    #[must_use]
    pub fn display_hashtags(&self) -> Vec<String> {
        self.hashtags
            .iter()
            .map(|tag| {
                if tag.starts_with('#') {
                    tag.clone()
                } else {
                    format!("#{tag}")
                }
            })
            .collect()
    }
}
