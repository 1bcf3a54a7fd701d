//! Normalization of the model's free-form reply into a [`Post`].
//!
//! The reply is expected to be one JSON object, possibly wrapped in a code
//! fence. Field names are the ones requested in the prompt; anything missing,
//! blank, or of the wrong type falls back to a fixed default per field.

use chrono::Utc;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use socialsave_core::{detect_platform, MediaType, Post};

use crate::error::AnalysisError;

pub const DEFAULT_AUTHOR: &str = "Unknown Author";
pub const DEFAULT_CONTENT: &str = "Content not available";
pub const DEFAULT_LIKES: &str = "N/A";
pub const DEFAULT_ANALYSIS: &str = "Metadata extracted successfully.";

/// Hex characters of the URL digest used as the thumbnail seed.
const THUMBNAIL_SEED_LEN: usize = 16;

/// Strip a leading code fence (with optional language tag such as `json`),
/// a trailing code fence, and surrounding whitespace.
///
/// When the fence line holds only a tag, the whole line is dropped. When the
/// payload starts on the fence line, only blanks and an alphanumeric tag are.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = match rest.split_once('\n') {
            Some((fence_line, after)) if !fence_line.contains(['{', '[']) => after,
            _ => rest
                .trim_start()
                .trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

/// Parse the model reply into a JSON object.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedResponse`] if the fence-stripped text is
/// not valid JSON or is valid JSON but not an object. No partial data is
/// salvaged.
pub fn parse_model_reply(text: &str) -> Result<Map<String, Value>, AnalysisError> {
    let body = strip_code_fences(text);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "model reply was JSON but not an object");
            Err(AnalysisError::MalformedResponse)
        }
        Err(e) => {
            tracing::warn!(error = %e, reply_chars = text.len(), "model reply is not valid JSON");
            Err(AnalysisError::MalformedResponse)
        }
    }
}

/// Build a [`Post`] from a parsed reply, applying one default per field.
///
/// | key         | default                              |
/// |-------------|--------------------------------------|
/// | `author`    | `"Unknown Author"`                   |
/// | `content`   | `"Content not available"`            |
/// | `hashtags`  | empty                                |
/// | `mediaType` | `unknown` (also for unknown values)  |
/// | `mediaUrl`  | absent                               |
/// | `likes`     | `"N/A"`                              |
/// | `analysis`  | `"Metadata extracted successfully."` |
///
/// The id, timestamp, platform, and thumbnail never come from the model: the
/// id is a fresh UUID, the platform is classified locally from `url`, and the
/// thumbnail is seeded from a hash of `url`.
#[must_use]
pub fn post_from_reply(fields: &Map<String, Value>, url: &str, thumbnail_base: &str) -> Post {
    Post {
        id: Uuid::new_v4().to_string(),
        url: url.to_string(),
        platform: detect_platform(url),
        author: Some(text_field(fields, "author").unwrap_or_else(|| DEFAULT_AUTHOR.to_string())),
        content: Some(text_field(fields, "content").unwrap_or_else(|| DEFAULT_CONTENT.to_string())),
        hashtags: hashtags_field(fields),
        media_type: text_field(fields, "mediaType")
            .map_or(MediaType::Unknown, |t| MediaType::parse(&t)),
        media_url: text_field(fields, "mediaUrl"),
        thumbnail_url: Some(thumbnail_url(thumbnail_base, url)),
        likes: Some(text_field(fields, "likes").unwrap_or_else(|| DEFAULT_LIKES.to_string())),
        timestamp: Some(Utc::now()),
        analysis: Some(
            text_field(fields, "analysis").unwrap_or_else(|| DEFAULT_ANALYSIS.to_string()),
        ),
    }
}

/// Fence-strip, parse, and normalize in one step.
///
/// # Errors
///
/// Returns [`AnalysisError::MalformedResponse`] when the reply is not a JSON
/// object.
pub fn normalize_reply(text: &str, url: &str, thumbnail_base: &str) -> Result<Post, AnalysisError> {
    let fields = parse_model_reply(text)?;
    Ok(post_from_reply(&fields, url, thumbnail_base))
}

/// Placeholder thumbnail for `url`: `{base}{seed}/400/300`, where the seed
/// is the first 16 hex characters of the URL's SHA-256. Same URL, same image.
#[must_use]
pub fn thumbnail_url(base: &str, url: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
    let seed = &digest[..THUMBNAIL_SEED_LEN];
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    format!("{base}{seed}/400/300")
}

/// Non-blank string value, or a number rendered as text. Anything else is
/// treated as absent.
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Array of strings (non-strings and blanks skipped). A single string is
/// split on whitespace and commas.
fn hashtags_field(fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("hashtags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        Some(Value::String(s)) => s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
