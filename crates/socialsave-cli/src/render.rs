//! Plain-text rendering of records for the terminal.

use chrono::{DateTime, Utc};
use socialsave_core::Post;

const AUTHOR_WIDTH: usize = 20;

/// Multi-line card for one record, ending with a newline.
pub(crate) fn card(post: &Post) -> String {
    let mut lines = vec![
        format!("{} | {}", post.platform.display_name(), post.media_type),
        format!("Author:   {}", or_dash(post.author.as_deref())),
        format!("URL:      {}", post.url),
        format!("Caption:  {}", or_dash(post.content.as_deref())),
    ];

    let tags = post.display_hashtags();
    if !tags.is_empty() {
        lines.push(format!("Hashtags: {}", tags.join(" ")));
    }
    lines.push(format!("Likes:    {}", or_dash(post.likes.as_deref())));
    lines.push(format!(
        "Media:    {}",
        post.media_url.as_deref().unwrap_or("no direct link found")
    ));
    if let Some(thumb) = &post.thumbnail_url {
        lines.push(format!("Preview:  {thumb}"));
    }
    lines.push(format!("Summary:  {}", or_dash(post.analysis.as_deref())));
    lines.push(format!(
        "Id:       {}  (saved {})",
        post.id,
        fmt_timestamp(post.timestamp)
    ));
    terminated(&lines)
}

/// One row per record under a fixed header.
pub(crate) fn history_table(posts: &[Post]) -> String {
    let header = format!(
        "{:<10}{:<11}{:<9}{:<22}URL",
        "ID", "PLATFORM", "MEDIA", "AUTHOR"
    );
    let rows = posts.iter().map(|post| {
        format!(
            "{:<10}{:<11}{:<9}{:<22}{}",
            post.short_id(),
            post.platform.as_str(),
            post.media_type.as_str(),
            truncate(or_dash(post.author.as_deref()), AUTHOR_WIDTH),
            post.url
        )
    });
    let lines: Vec<String> = std::iter::once(header).chain(rows).collect();
    terminated(&lines)
}

fn terminated(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("\u{2014}")
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!(
            "{}...",
            value.chars().take(max_chars - 3).collect::<String>()
        )
    } else {
        value.to_string()
    }
}

fn fmt_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "\u{2014}".to_string(),
        |t| t.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use socialsave_core::{MediaType, Platform};

    use super::*;

    fn sample() -> Post {
        Post {
            id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
            url: "https://twitter.com/jane/status/1".to_string(),
            platform: Platform::Twitter,
            author: Some("Jane".to_string()),
            content: Some("Hello".to_string()),
            hashtags: vec!["a".to_string(), "#b".to_string()],
            media_type: MediaType::Image,
            media_url: None,
            thumbnail_url: Some("https://picsum.photos/seed/abc/400/300".to_string()),
            likes: Some("1.2K".to_string()),
            timestamp: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap()),
            analysis: Some("A greeting.".to_string()),
        }
    }

    #[test]
    fn card_shows_every_field() {
        let text = card(&sample());
        assert!(text.starts_with("X (Twitter) | image\n"));
        assert!(text.contains("Author:   Jane\n"));
        assert!(text.contains("Hashtags: #a #b\n"));
        assert!(text.contains("Media:    no direct link found\n"));
        assert!(text.contains("Preview:  https://picsum.photos/seed/abc/400/300\n"));
        assert!(text.contains("(saved 2026-03-01 12:30 UTC)"));
    }

    #[test]
    fn card_is_one_terminated_line_per_field() {
        let text = card(&sample());
        assert!(text.ends_with(
            "Summary:  A greeting.\nId:       0f8fad5b-d9cb-469f-a165-70867728950e  (saved 2026-03-01 12:30 UTC)\n"
        ));
        assert_eq!(text.lines().count(), 10);
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn card_omits_empty_hashtags_and_dashes_missing_fields() {
        let post = Post {
            hashtags: vec![],
            author: None,
            timestamp: None,
            ..sample()
        };
        let text = card(&post);
        assert!(!text.contains("Hashtags:"));
        assert!(text.contains("Author:   \u{2014}\n"));
        assert!(text.contains("(saved \u{2014})"));
    }

    #[test]
    fn table_has_header_and_short_ids() {
        let long_author = Post {
            author: Some("A very long display name indeed".to_string()),
            ..sample()
        };
        let table = history_table(&[sample(), long_author]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].starts_with("0f8fad5b  twitter"));
        assert!(lines[2].contains("A very long displ..."));
        assert!(table.ends_with('\n'));

        let empty = history_table(&[]);
        assert_eq!(empty.lines().count(), 1);
        assert!(empty.ends_with("URL\n"));
    }
}
