//! Error and fault types for the store
//!
//! [`FetchError`] travels inside the boundary only: the resolver absorbs it.
//! What crosses the boundary instead is a [`Fault`] — a structured,
//! serializable description of a degradation that already happened. Pages
//! never see an `Err`; observers see faults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vitrine_content::{ContentType, RecordId};

/// Errors raised by fetcher implementations
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or remote-side failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// IO error reading a local payload file
    #[error("io error reading {path}: {source}")]
    Io {
        /// The file that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Payload that did not parse as JSON
    #[error("undecodable payload at {path}: {detail}")]
    Decode {
        /// The file that failed
        path: PathBuf,
        /// Parser message
        detail: String,
    },

    /// Collection payload that was valid JSON but not an array
    #[error("collection payload for '{kind}' is not an array")]
    NotACollection {
        /// The collection requested
        kind: ContentType,
    },
}

impl FetchError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error with path context
    pub fn decode(path: impl Into<PathBuf>, source: &serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            detail: source.to_string(),
        }
    }
}

/// A degradation the resolver absorbed while producing a snapshot
///
/// Faults are data, not errors: the snapshot is always delivered, and the
/// fault list says what was papered over to deliver it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum Fault {
    /// The fetch itself failed; the snapshot fell back to defaults
    Transport {
        /// Collection or config key being fetched
        subject: String,
        /// Fetcher error message
        detail: String,
    },

    /// One remote record did not decode and was skipped
    UndecodableRecord {
        /// The collection
        kind: ContentType,
        /// Decoder message
        detail: String,
    },

    /// Two remote records claimed the same id; the first one was kept
    DuplicateId {
        /// The collection
        kind: ContentType,
        /// The colliding id
        id: RecordId,
    },

    /// The registry has no entry for this collection
    MissingDefaults {
        /// The collection
        kind: ContentType,
    },

    /// A config payload arrived but was not a JSON object
    MalformedConfig {
        /// The config key
        key: String,
    },
}
