//! Tolerant parsing of loosely-serialized fields
//!
//! The remote store hands back list-like fields in four shapes: an actual
//! JSON array, a JSON-encoded array in a string, a bare JSON scalar in a
//! string, or comma-separated text. [`LooseField`] classifies any of them
//! into a tagged variant that callers consume exhaustively; nothing in this
//! module ever fails.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Deref;

/// Classified result of parsing one loosely-serialized field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LooseField {
    /// Input was (or decoded to) a sequence
    List(Vec<String>),
    /// Input decoded to a single non-list value
    Scalar(String),
    /// Input was absent, null, or not list-like at all
    Empty,
}

impl LooseField {
    /// Classify a JSON value
    ///
    /// Arrays pass through element-wise; strings go through the tolerant
    /// text path; anything else (numbers, booleans, objects, null) is
    /// [`LooseField::Empty`].
    #[must_use]
    pub fn parse(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.iter().map(stringify).collect()),
            Value::String(text) => Self::parse_text(text),
            _ => Self::Empty,
        }
    }

    /// Classify raw text
    ///
    /// Tries a structured (JSON) parse first; when that fails, falls through
    /// to comma-splitting with whitespace trim and empty-piece drop.
    #[must_use]
    pub fn parse_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => Self::List(items.iter().map(stringify).collect()),
            Ok(Value::Null) => Self::Empty,
            Ok(scalar) => Self::Scalar(stringify(&scalar)),
            Err(_) => {
                let pieces: Vec<String> = text
                    .split(',')
                    .map(str::trim)
                    .filter(|piece| !piece.is_empty())
                    .map(str::to_string)
                    .collect();
                if pieces.is_empty() {
                    Self::Empty
                } else {
                    Self::List(pieces)
                }
            }
        }
    }

    /// Collapse into a plain list
    ///
    /// Scalars become single-element lists, empties become empty lists.
    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Scalar(item) => vec![item],
            Self::Empty => Vec::new(),
        }
    }
}

/// Normalize any loosely-serialized list field into a plain string list
///
/// Idempotent: a value already in canonical list shape passes through
/// unchanged, so `normalize_list(normalize_list(x)) == normalize_list(x)`.
#[must_use]
pub fn normalize_list(value: &Value) -> Vec<String> {
    LooseField::parse(value).into_list()
}

/// Normalize a loosely-serialized map field (social links and the like)
///
/// A JSON object passes through with string values kept as-is and other
/// values re-serialized; JSON text is parsed first; any other shape yields
/// an empty map.
#[must_use]
pub fn normalize_map(value: &Value) -> BTreeMap<String, String> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, val)| (key.clone(), stringify(val)))
            .collect(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner @ Value::Object(_)) => normalize_map(&inner),
            _ => BTreeMap::new(),
        },
        _ => BTreeMap::new(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tolerant list field
///
/// Deserializes from any of the loose shapes; serializes as a plain array,
/// which is the canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LooseList(pub Vec<String>);

impl LooseList {
    /// Create from canonical items
    #[inline]
    #[must_use]
    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    /// Borrow the items
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume into the items
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Number of items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no items
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for LooseList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for LooseList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl<'a> FromIterator<&'a str> for LooseList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl Serialize for LooseList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LooseList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(normalize_list(&value)))
    }
}

/// Tolerant string-to-string map field
///
/// Same tolerance as [`LooseList`] for the map shape; serializes as a plain
/// object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LooseMap(pub BTreeMap<String, String>);

impl LooseMap {
    /// Look up one entry
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the map has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for LooseMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl Serialize for LooseMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LooseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(normalize_map(&value)))
    }
}
