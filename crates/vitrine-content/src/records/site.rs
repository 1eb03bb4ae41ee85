//! FAQ, legal text, and company timeline records

use crate::types::{ContentRecord, ContentType, RecordId};
use serde::{Deserialize, Serialize};

/// One FAQ entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqEntry {
    /// Stable identity
    pub id: RecordId,
    /// The question
    pub question: String,
    /// The answer
    pub answer: String,
    /// FAQ group ("billing", "general", ...); the filter discriminant
    pub group: String,
}

impl ContentRecord for FaqEntry {
    const KIND: ContentType = ContentType::Faq;

    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        if self.group.is_empty() {
            None
        } else {
            Some(&self.group)
        }
    }
}

/// One section of a legal document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalSection {
    /// Stable identity
    pub id: RecordId,
    /// Section heading
    pub heading: String,
    /// Section body text
    pub body: String,
    /// Owning document ("privacy", "terms", ...); the filter discriminant
    pub document: String,
}

impl ContentRecord for LegalSection {
    const KIND: ContentType = ContentType::LegalSection;

    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        if self.document.is_empty() {
            None
        } else {
            Some(&self.document)
        }
    }
}

/// One company timeline milestone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    /// Stable identity
    pub id: RecordId,
    /// Year label ("2021")
    pub year: String,
    /// Milestone title
    pub title: String,
    /// Milestone description
    pub description: String,
}

impl ContentRecord for TimelineEvent {
    const KIND: ContentType = ContentType::TimelineEvent;

    fn id(&self) -> RecordId {
        self.id
    }
}
