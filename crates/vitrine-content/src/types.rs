//! Core types for the content model
//!
//! Defines the fundamental types shared by every collection:
//! - Content type discriminant
//! - Record identity
//! - The record trait each typed struct implements

use crate::error::ContentError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminant for every collection the remote store serves
///
/// Serializes to the store's camelCase strings (`blogPost`, `teamMember`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    /// Pricing plans
    Pricing,
    /// Job postings
    Job,
    /// Blog posts
    BlogPost,
    /// Portfolio projects
    Project,
    /// Team members
    TeamMember,
    /// FAQ entries
    Faq,
    /// Legal text sections
    LegalSection,
    /// Brand / partner entries
    Brand,
    /// Testimonials
    Testimonial,
    /// Company timeline events
    TimelineEvent,
}

impl ContentType {
    /// All known content types, in declaration order
    pub const ALL: [ContentType; 10] = [
        Self::Pricing,
        Self::Job,
        Self::BlogPost,
        Self::Project,
        Self::TeamMember,
        Self::Faq,
        Self::LegalSection,
        Self::Brand,
        Self::Testimonial,
        Self::TimelineEvent,
    ];

    /// Store-side string form (camelCase)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pricing => "pricing",
            Self::Job => "job",
            Self::BlogPost => "blogPost",
            Self::Project => "project",
            Self::TeamMember => "teamMember",
            Self::Faq => "faq",
            Self::LegalSection => "legalSection",
            Self::Brand => "brand",
            Self::Testimonial => "testimonial",
            Self::TimelineEvent => "timelineEvent",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ContentError::UnknownType(s.to_string()))
    }
}

/// Stable record identity, unique within one type's collection
///
/// Remote payloads carry ids either as JSON numbers or as numeric strings;
/// both deserialize into the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Wrap a raw id value
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or numeric string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(RecordId(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(RecordId)
                    .map_err(|_| E::custom("record id must be non-negative"))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if v.fract() == 0.0 && v >= 0.0 {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    Ok(RecordId(v as u64))
                } else {
                    Err(E::custom("record id must be a non-negative integer"))
                }
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.trim()
                    .parse::<u64>()
                    .map(RecordId)
                    .map_err(|_| E::custom(format!("invalid numeric record id: {v:?}")))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Trait implemented by every typed content record
///
/// Records are read-only on this side of the boundary: the admin write path
/// creates and updates them, the resolver only decodes, normalizes, filters
/// and orders them.
pub trait ContentRecord:
    Clone + fmt::Debug + Send + Sync + Serialize + serde::de::DeserializeOwned + 'static
{
    /// Which collection this record belongs to
    const KIND: ContentType;

    /// Stable identity within the collection
    fn id(&self) -> RecordId;

    /// Category discriminant used by filters (job type, project category, ...)
    ///
    /// Records without a category concept return `None` and never match a
    /// category filter.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Post-deserialization fixups that cannot be expressed field-locally
    ///
    /// The default is a no-op; team members hoist social-link map entries
    /// onto the record here.
    fn normalize(&mut self) {}
}
