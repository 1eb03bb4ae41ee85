//! Namespaced JSON key-value persistence
//!
//! One value per namespace, either a list (mutation logs) or a scalar
//! (cookie consent). Two backends: process memory and one JSON file per
//! namespace with atomic replace-on-write.

use crate::error::StoreError;
use dashmap::DashMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Namespaced local persistence
pub trait LocalStore: Send + Sync + 'static {
    /// Load the value stored under a namespace
    ///
    /// # Errors
    /// Backend failures; an absent namespace is `Ok(None)`, not an error.
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError>;

    /// Store a value under a namespace, replacing any previous value
    ///
    /// # Errors
    /// Backend failures. Callers treat a failed save as best-effort.
    fn save(&self, namespace: &str, value: &Value) -> Result<(), StoreError>;
}

/// In-memory store
///
/// The default backend for tests and for environments without durable
/// storage; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocalStore for MemoryStore {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(namespace).map(|entry| entry.value().clone()))
    }

    fn save(&self, namespace: &str, value: &Value) -> Result<(), StoreError> {
        self.entries.insert(namespace.to_string(), value.clone());
        Ok(())
    }
}

/// File-backed store, one `<namespace>.json` per namespace
///
/// Writes go to a temporary sibling first and rename into place, so a crash
/// mid-write never leaves a torn file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at a directory
    ///
    /// # Errors
    /// When the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    /// The backing directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        // namespaces are dot/underscore identifiers; keep path traversal out
        let safe: String = namespace
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl LocalStore for JsonFileStore {
    fn load(&self, namespace: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(namespace);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let value = serde_json::from_str(&text).map_err(|e| StoreError::corrupt(namespace, &e))?;
        Ok(Some(value))
    }

    fn save(&self, namespace: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(namespace);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::corrupt(namespace, &e))?;
        fs::write(&tmp, text).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load("leads").unwrap().is_none());

        store.save("leads", &json!([{"id": 1}])).unwrap();
        assert_eq!(store.load("leads").unwrap().unwrap(), json!([{"id": 1}]));

        store.save("leads", &json!([])).unwrap();
        assert_eq!(store.load("leads").unwrap().unwrap(), json!([]));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.save("cookie_consent", &json!("accepted")).unwrap();
        assert_eq!(
            store.load("cookie_consent").unwrap().unwrap(),
            json!("accepted")
        );

        // a fresh store over the same directory sees the data
        let reopened = JsonFileStore::new(dir.path()).unwrap();
        assert_eq!(
            reopened.load("cookie_consent").unwrap().unwrap(),
            json!("accepted")
        );
    }

    #[test]
    fn file_store_sanitizes_namespace_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.save("../escape", &json!(1)).unwrap();
        let stored: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(stored.len(), 1);
        assert!(store.load("../escape").unwrap().is_some());
    }

    #[test]
    fn file_store_reports_corrupt_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        fs::write(dir.path().join("leads.json"), "{broken").unwrap();

        let err = store.load("leads").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
