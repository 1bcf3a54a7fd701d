//! File-backed history across process-like reloads.

use socialsave_core::{detect_platform, MediaType, Post};
use socialsave_history::{FileStore, HistoryCache, KeyValueStore, HISTORY_KEY, MAX_ENTRIES};

fn post(id: &str, url: &str) -> Post {
    Post {
        id: id.to_string(),
        url: url.to_string(),
        platform: detect_platform(url),
        author: Some("Unknown Author".to_string()),
        content: Some("Content not available".to_string()),
        hashtags: vec![],
        media_type: MediaType::Text,
        media_url: None,
        thumbnail_url: None,
        likes: Some("N/A".to_string()),
        timestamp: None,
        analysis: Some("Metadata extracted successfully.".to_string()),
    }
}

#[test]
fn history_survives_reload_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut cache = HistoryCache::load(FileStore::new(dir.path()));
        cache.record(post("p1", "https://www.linkedin.com/posts/1")).unwrap();
        cache.record(post("p2", "https://www.facebook.com/posts/2")).unwrap();
    }

    let cache = HistoryCache::load(FileStore::new(dir.path()));
    let ids: Vec<&str> = cache.entries().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);
    assert!(dir.path().join(format!("{HISTORY_KEY}.json")).exists());
}

#[test]
fn bound_holds_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cache = HistoryCache::load(FileStore::new(dir.path()));
    for i in 0..15 {
        cache
            .record(post(&format!("p{i}"), &format!("https://tiktok.com/@u/video/{i}")))
            .unwrap();
    }

    let raw = FileStore::new(dir.path())
        .get(HISTORY_KEY)
        .unwrap()
        .expect("persisted");
    let stored: Vec<Post> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), MAX_ENTRIES);
    assert_eq!(stored[0].id, "p14");
}

#[test]
fn corrupt_file_loads_empty_and_is_overwritten_on_next_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(format!("{HISTORY_KEY}.json")), "garbage").unwrap();

    let mut cache = HistoryCache::load(FileStore::new(dir.path()));
    assert!(cache.is_empty());

    cache.record(post("p1", "https://instagram.com/p/1")).unwrap();
    let reloaded = HistoryCache::load(FileStore::new(dir.path()));
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn clear_removes_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cache = HistoryCache::load(FileStore::new(dir.path()));
    cache.record(post("p1", "https://x.com/a/status/1")).unwrap();
    cache.clear().unwrap();

    assert!(!dir.path().join(format!("{HISTORY_KEY}.json")).exists());
    assert!(HistoryCache::load(FileStore::new(dir.path())).is_empty());
}
