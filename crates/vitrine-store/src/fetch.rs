//! The fetcher boundary
//!
//! [`ContentFetcher`] is the entire surface to the remote content store: one
//! call for collections, one for keyed config blobs. Implementations raise
//! [`FetchError`]; the resolver is the only caller and absorbs every error.

use crate::error::FetchError;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vitrine_content::ContentType;

/// Boundary to the remote content store
///
/// Two operations, nothing else. Transport is opaque; implementations decide
/// what "remote" means (HTTP, files, memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentFetcher: Send + Sync + 'static {
    /// Fetch the full collection for one content type
    ///
    /// # Errors
    /// Any transport or decode failure. The resolver degrades it to an empty
    /// collection and records a fault.
    async fn fetch_collection(&self, kind: ContentType) -> Result<Vec<Value>, FetchError>;

    /// Fetch one keyed configuration blob
    ///
    /// `Ok(None)` means the store answered and has no blob under this key.
    ///
    /// # Errors
    /// Any transport or decode failure; degraded the same way.
    async fn fetch_config(&self, key: &str) -> Result<Option<Value>, FetchError>;
}

/// Scripted in-memory fetcher
///
/// Backs tests and demos; can be told to fail per collection or wholesale to
/// exercise the degradation path. Clones share state, so callers can keep a
/// handle and script new payloads after handing the fetcher to a resolver —
/// the way an admin write becomes visible on the next fetch.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    inner: Arc<StaticState>,
}

#[derive(Debug, Default)]
struct StaticState {
    collections: RwLock<HashMap<ContentType, Vec<Value>>>,
    configs: RwLock<HashMap<String, Value>>,
    failing: RwLock<HashSet<ContentType>>,
    fail_everything: RwLock<bool>,
}

impl StaticFetcher {
    /// Create an empty fetcher (every collection resolves to `[]`)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a collection payload
    pub fn insert_collection(&self, kind: ContentType, records: Vec<Value>) {
        self.inner.collections.write().insert(kind, records);
    }

    /// Script a config payload
    pub fn insert_config(&self, key: impl Into<String>, value: Value) {
        self.inner.configs.write().insert(key.into(), value);
    }

    /// Make one collection fail with a transport error
    pub fn fail_collection(&self, kind: ContentType) {
        self.inner.failing.write().insert(kind);
    }

    /// Make every call fail with a transport error
    pub fn fail_everything(&self) {
        *self.inner.fail_everything.write() = true;
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch_collection(&self, kind: ContentType) -> Result<Vec<Value>, FetchError> {
        if *self.inner.fail_everything.read() || self.inner.failing.read().contains(&kind) {
            return Err(FetchError::Transport(format!(
                "scripted failure for '{kind}'"
            )));
        }
        Ok(self
            .inner
            .collections
            .read()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_config(&self, key: &str) -> Result<Option<Value>, FetchError> {
        if *self.inner.fail_everything.read() {
            return Err(FetchError::Transport(format!(
                "scripted failure for '{key}'"
            )));
        }
        Ok(self.inner.configs.read().get(key).cloned())
    }
}

/// Directory-backed fetcher
///
/// Reads `<root>/<kind>.json` for collections and `<root>/config/<key>.json`
/// for blobs. Stands in for the remote store during local development; every
/// IO or parse problem is a [`FetchError`] for the resolver to absorb.
#[derive(Debug, Clone)]
pub struct JsonDirFetcher {
    root: PathBuf,
}

impl JsonDirFetcher {
    /// Create a fetcher over a payload directory
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The payload directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_value(&self, path: &Path) -> Result<Value, FetchError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FetchError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| FetchError::decode(path, &e))
    }
}

#[async_trait]
impl ContentFetcher for JsonDirFetcher {
    async fn fetch_collection(&self, kind: ContentType) -> Result<Vec<Value>, FetchError> {
        let path = self.root.join(format!("{kind}.json"));
        if !path.exists() {
            // absent file means an empty collection, not a failure
            return Ok(Vec::new());
        }
        match self.read_value(&path).await? {
            Value::Array(records) => Ok(records),
            _ => Err(FetchError::NotACollection { kind }),
        }
    }

    async fn fetch_config(&self, key: &str) -> Result<Option<Value>, FetchError> {
        let path = self.root.join("config").join(format!("{key}.json"));
        if !path.exists() {
            return Ok(None);
        }
        self.read_value(&path).await.map(Some)
    }
}
