//! Key/value persistence used by the history cache.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::HistoryError;

/// String-keyed storage of serialized values.
///
/// `set` replaces the whole value for a key; readers never observe a
/// partially written value.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError>;

    /// # Errors
    ///
    /// Returns [`HistoryError`] if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the backing storage cannot be updated.
    fn remove(&mut self, key: &str) -> Result<(), HistoryError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), HistoryError> {
        (**self).remove(key)
    }
}

/// One `<key>.json` file per key inside a data directory.
///
/// Writes go to a temp file unique to the process and write, then are
/// renamed into place. A failed write leaves no temp file behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, HistoryError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(HistoryError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

fn tmp_path_for(path: &Path) -> PathBuf {
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> HistoryError {
    HistoryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let tmp = tmp_path_for(&path);
        let written = std::fs::write(&tmp, value)
            .map_err(|e| io_error(&tmp, e))
            .and_then(|()| std::fs::rename(&tmp, &path).map_err(|e| io_error(&path, e)));
        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
                }
            }
            return Err(e);
        }
        tracing::debug!(path = %path.display(), bytes = value.len(), "store value written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), HistoryError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

/// In-process store; nothing survives the value being dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), HistoryError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), HistoryError> {
        self.values.remove(key);
        Ok(())
    }
}
