//! Most-recent-first cache of analyzed posts.

use std::collections::HashSet;

use socialsave_core::Post;

use crate::store::KeyValueStore;
use crate::HistoryError;

/// Maximum number of records retained.
pub const MAX_ENTRIES: usize = 10;

/// Storage key the serialized list lives under.
pub const HISTORY_KEY: &str = "socialSaveHistory";

/// Bounded history of [`Post`] records, newest first, unique by URL and by id.
///
/// Every mutation writes the full list back to the store. The in-memory list
/// is authoritative for the lifetime of the value.
pub struct HistoryCache<S> {
    store: S,
    entries: Vec<Post>,
}

impl<S: KeyValueStore> HistoryCache<S> {
    /// Read persisted history from `store`.
    ///
    /// Absent, unreadable, or corrupt data yields an empty cache; problems
    /// are logged, never returned. Whatever is loaded is deduplicated by URL
    /// and by id, then cut to [`MAX_ENTRIES`].
    pub fn load(store: S) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Post>>(&raw) {
                Ok(posts) => normalize(posts),
                Err(e) => {
                    tracing::warn!(error = %e, key = HISTORY_KEY, "stored history is corrupt; starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, key = HISTORY_KEY, "failed to read stored history; starting empty");
                Vec::new()
            }
        };
        tracing::debug!(entries = entries.len(), "history loaded");
        Self { store, entries }
    }

    /// Insert `post` at the front, dropping any older record with the same
    /// URL or id and anything past [`MAX_ENTRIES`], then persist.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if persisting fails. The in-memory list is
    /// updated either way.
    pub fn record(&mut self, post: Post) -> Result<(), HistoryError> {
        self.entries
            .retain(|existing| existing.url != post.url && existing.id != post.id);
        self.entries.insert(0, post);
        self.entries.truncate(MAX_ENTRIES);
        self.persist()
    }

    /// Empty the cache and remove the persisted list.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the persisted list cannot be removed.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    /// Exact lookup by id.
    #[must_use]
    pub fn select(&self, id: &str) -> Option<&Post> {
        self.entries.iter().find(|post| post.id == id)
    }

    /// Lookup by full id, or by an id prefix that matches exactly one record.
    #[must_use]
    pub fn resolve(&self, id_or_prefix: &str) -> Option<&Post> {
        if id_or_prefix.is_empty() {
            return None;
        }
        if let Some(post) = self.select(id_or_prefix) {
            return Some(post);
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|post| post.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(post), None) => Some(post),
            _ => None,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Post] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &serialized).inspect_err(|e| {
            tracing::error!(error = %e, "failed to persist history");
        })
    }
}

/// Keep the first record per URL and per id, and at most [`MAX_ENTRIES`]
/// records.
fn normalize(posts: Vec<Post>) -> Vec<Post> {
    let mut seen_urls = HashSet::new();
    let mut seen_ids = HashSet::new();
    posts
        .into_iter()
        .filter(|post| {
            if seen_urls.contains(&post.url) || seen_ids.contains(&post.id) {
                return false;
            }
            seen_urls.insert(post.url.clone());
            seen_ids.insert(post.id.clone());
            true
        })
        .take(MAX_ENTRIES)
        .collect()
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
