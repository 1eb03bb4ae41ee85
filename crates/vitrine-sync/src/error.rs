//! Error types for local persistence

use std::path::PathBuf;

/// Local persistence errors
///
/// These never reach a page: the mutation log absorbs them into the append
/// receipt and carries on with the broadcast.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO failure reading or writing a namespace file
    #[error("io error at {path}: {source}")]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A persisted value that no longer parses
    #[error("corrupt entry for namespace '{namespace}': {detail}")]
    Corrupt {
        /// The namespace involved
        namespace: String,
        /// Parser message
        detail: String,
    },

    /// The backing storage cannot be used at all
    #[error("local storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a corrupt-entry error
    pub fn corrupt(namespace: impl Into<String>, source: &serde_json::Error) -> Self {
        Self::Corrupt {
            namespace: namespace.into(),
            detail: source.to_string(),
        }
    }
}
