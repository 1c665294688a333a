//! File-backed storage backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;

use super::{Storage, StorageError};

/// A [`Storage`] persisted as a single JSON object on disk.
///
/// The whole map is loaded on open and rewritten on every mutation, which
/// is fine at this scale: the store holds one cart, one user list, one
/// order, and a handful of lockout records. A missing or corrupt file
/// degrades to an empty store with a warning rather than failing the open.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, Value>>,
}

impl FileStorage {
    /// Open the store at `path`, creating it lazily on first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), StorageError> {
        let contents = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// Read the map from disk, treating a missing or malformed file as empty.
fn load_entries(path: &Path) -> Result<HashMap<String, Value>, StorageError> {
    let contents = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_slice(&contents) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "corrupt data file, starting empty");
            Ok(HashMap::new())
        }
    }
}

impl Storage for FileStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_owned(), value);
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        self.flush(&entries)
    }
}
