//! Single-post JSON archive export.

use std::path::{Path, PathBuf};

use socialsave_core::Post;

use crate::HistoryError;

/// `social-save-{platform}-{short id}.json`
#[must_use]
pub fn archive_file_name(post: &Post) -> String {
    format!(
        "social-save-{}-{}.json",
        post.platform.as_str(),
        post.short_id()
    )
}

/// Pretty-printed JSON of the whole record.
///
/// # Errors
///
/// Returns [`HistoryError::Serialize`] if the record cannot be serialized.
pub fn archive_json(post: &Post) -> Result<String, HistoryError> {
    Ok(serde_json::to_string_pretty(post)?)
}

/// Write the archive for `post` into `dir` (created if missing) and return
/// the file path. An existing file with the same name is overwritten.
///
/// # Errors
///
/// Returns [`HistoryError`] on serialization or filesystem failure.
pub fn write_archive(post: &Post, dir: &Path) -> Result<PathBuf, HistoryError> {
    let body = archive_json(post)?;
    std::fs::create_dir_all(dir).map_err(|source| HistoryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(archive_file_name(post));
    std::fs::write(&path, body).map_err(|source| HistoryError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(id = %post.id, path = %path.display(), "archive written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialsave_core::{MediaType, Platform};

    fn sample() -> Post {
        Post {
            id: "9b2e4c1a-77aa-4f0e-9d1c-0c6f5a3e2b10".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            platform: Platform::YouTube,
            author: Some("Channel".to_string()),
            content: Some("A video".to_string()),
            hashtags: vec![],
            media_type: MediaType::Video,
            media_url: Some("https://cdn.example/v.mp4".to_string()),
            thumbnail_url: Some("https://picsum.photos/seed/1/400/300".to_string()),
            likes: Some("N/A".to_string()),
            timestamp: None,
            analysis: Some("Metadata extracted successfully.".to_string()),
        }
    }

    #[test]
    fn file_name_uses_platform_tag_and_short_id() {
        assert_eq!(archive_file_name(&sample()), "social-save-youtube-9b2e4c1a.json");
    }

    #[test]
    fn archive_json_is_pretty_camel_case() {
        let json = archive_json(&sample()).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"mediaUrl\": \"https://cdn.example/v.mp4\""));
        let parsed: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn write_archive_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let path = write_archive(&sample(), &out).unwrap();

        assert_eq!(path, out.join("social-save-youtube-9b2e4c1a.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, archive_json(&sample()).unwrap());
    }
}
