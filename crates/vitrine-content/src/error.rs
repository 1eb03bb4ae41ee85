//! Error types for the content model
//!
//! The normalizer itself never fails; these errors cover the edges where a
//! caller asks for something the model cannot represent (unknown type
//! strings, undecodable records).

use crate::types::ContentType;

/// Content model errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A type string no collection answers to
    #[error("unknown content type: '{0}'")]
    UnknownType(String),

    /// A remote record that could not be decoded into its typed struct
    #[error("undecodable {kind} record: {detail}")]
    UndecodableRecord {
        /// The collection the record claimed to belong to
        kind: ContentType,
        /// Decoder message
        detail: String,
    },
}

impl ContentError {
    /// Create an undecodable-record error from a serde failure
    pub fn undecodable(kind: ContentType, source: &serde_json::Error) -> Self {
        Self::UndecodableRecord {
            kind,
            detail: source.to_string(),
        }
    }
}
