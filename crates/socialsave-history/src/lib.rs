//! Bounded, URL-deduplicated history of analyzed posts, persisted through a
//! small key/value store, plus single-post JSON archive export.

pub mod archive;
pub mod history;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use archive::{archive_file_name, archive_json, write_archive};
pub use history::{HistoryCache, HISTORY_KEY, MAX_ENTRIES};
pub use store::{FileStore, KeyValueStore, MemoryStore};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}
