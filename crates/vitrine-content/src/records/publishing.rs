//! Blog post, portfolio project, and brand records

use crate::loose::LooseList;
use crate::types::{ContentRecord, ContentType, RecordId};
use serde::{Deserialize, Serialize};

/// One blog post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    /// Stable identity
    pub id: RecordId,
    /// Post title
    pub title: String,
    /// URL slug
    pub slug: String,
    /// Listing excerpt
    pub excerpt: String,
    /// Full body (markdown as authored)
    pub body: String,
    /// Topic tags; arrives loose
    pub tags: LooseList,
    /// Publication date as authored ("2024-03-01")
    pub published_at: String,
    /// Editorial category; the filter discriminant
    pub category: String,
}

impl ContentRecord for BlogPost {
    const KIND: ContentType = ContentType::BlogPost;

    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        if self.category.is_empty() {
            None
        } else {
            Some(&self.category)
        }
    }
}

/// One portfolio project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    /// Stable identity
    pub id: RecordId,
    /// Project title
    pub title: String,
    /// One-line summary
    pub summary: String,
    /// Portfolio category; the filter discriminant
    pub category: String,
    /// Cover image URL
    pub image_url: String,
    /// Technology list; arrives loose
    pub tech_stack: LooseList,
    /// Case-study or live link
    pub link: String,
}

impl ContentRecord for ProjectEntry {
    const KIND: ContentType = ContentType::Project;

    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        if self.category.is_empty() {
            None
        } else {
            Some(&self.category)
        }
    }
}

/// One brand / partner logo entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandEntry {
    /// Stable identity
    pub id: RecordId,
    /// Brand name
    pub name: String,
    /// Logo image URL
    pub logo_url: String,
    /// Placement tier ("partner", "client", ...); the filter discriminant
    pub tier: String,
    /// Outbound link
    pub link: String,
}

impl ContentRecord for BrandEntry {
    const KIND: ContentType = ContentType::Brand;

    fn id(&self) -> RecordId {
        self.id
    }

    fn category(&self) -> Option<&str> {
        if self.tier.is_empty() {
            None
        } else {
            Some(&self.tier)
        }
    }
}
