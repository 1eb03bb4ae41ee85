//! Named configuration blobs
//!
//! A [`ConfigBlob`] is a single keyed JSON object fetched and consumed as a
//! whole (legal document metadata, per-service page overrides). Its internal
//! shape is validated only by the consumer; this type just offers tolerant
//! accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One named, opaque configuration object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigBlob {
    /// The key this blob was fetched under
    pub key: String,
    /// The object's fields
    pub fields: Map<String, Value>,
}

impl ConfigBlob {
    /// Create an empty blob for a key
    #[inline]
    #[must_use]
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: Map::new(),
        }
    }

    /// Wrap a fetched value; only objects qualify
    #[must_use]
    pub fn from_value(key: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self {
                key: key.into(),
                fields,
            }),
            _ => None,
        }
    }

    /// Get value at path (dot notation)
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            match current {
                Value::Object(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// String field at path, if present and a string
    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Array field at path, if present and an array
    #[must_use]
    pub fn get_array(&self, path: &str) -> Option<&Vec<Value>> {
        self.get_path(path).and_then(Value::as_array)
    }

    /// Whether the blob has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
