//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{Storage, StorageError};

/// An ephemeral [`Storage`] backed by a `HashMap`.
///
/// State is lost on drop. Used by tests and as the fallback when no data
/// file is configured.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_replaces_value() {
        let storage = MemoryStorage::new();
        storage.set_raw("k", Value::from(1)).unwrap();
        storage.set_raw("k", Value::from(2)).unwrap();
        assert_eq!(storage.get_raw("k").unwrap(), Some(Value::from(2)));
    }

    #[test]
    fn test_remove_deletes_value() {
        let storage = MemoryStorage::new();
        storage.set_raw("k", Value::from(1)).unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get_raw("k").unwrap(), None);
    }
}
