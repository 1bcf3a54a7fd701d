//! Prompt text sent to the model.
//!
//! The search tool rules out a transport-level response schema, so the JSON
//! shape is pinned down here, in the instructions.

/// Keys the model is told to emit, in schema order.
pub const RESPONSE_KEYS: [&str; 7] = [
    "author",
    "content",
    "hashtags",
    "mediaType",
    "mediaUrl",
    "likes",
    "analysis",
];

/// Build the extraction prompt for `url`.
#[must_use]
pub fn build_analysis_prompt(url: &str) -> String {
    format!(
        r#"Go to the following URL: {url}

Use the Google Search tool to visit the page and gather its public metadata.
Your task is to analyze this social media post and extract metadata for a structured archive.

Extract:
1. Author name (username or display name).
2. The full text content or caption of the post.
3. Any visible hashtags.
4. The primary media type: "video", "image", or "text".
5. A direct URL to the post's video or image file. Look in the page metadata:
   og:video, og:video:secure_url, og:image, twitter:player:stream, and any
   JSON-LD "contentUrl" or "embedUrl". If none is discoverable, use null.
6. Engagement metrics (likes, views) if visible, as a short string.
7. A one-sentence summary of what the post is about.

Respond with exactly one raw JSON object and nothing else. Do not wrap it in
markdown code fences and do not add any prose before or after it. Schema:
{{
  "author": "string",
  "content": "string",
  "hashtags": ["string"],
  "mediaType": "video" | "image" | "text" | "unknown",
  "mediaUrl": "string" | null,
  "likes": "string",
  "analysis": "string"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_url_and_every_schema_key() {
        let prompt = build_analysis_prompt("https://x.com/nasa/status/1");
        assert!(prompt.contains("https://x.com/nasa/status/1"));
        for key in RESPONSE_KEYS {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing key {key}");
        }
    }

    #[test]
    fn prompt_names_media_metadata_hints() {
        let prompt = build_analysis_prompt("https://example.org");
        for hint in ["og:video", "og:image", "twitter:player:stream", "contentUrl", "embedUrl"] {
            assert!(prompt.contains(hint), "missing hint {hint}");
        }
    }

    #[test]
    fn prompt_forbids_code_fences() {
        let prompt = build_analysis_prompt("https://example.org");
        assert!(prompt.contains("exactly one raw JSON object"));
        assert!(prompt.contains("code fences"));
    }
}
