//! Team member and testimonial records

use crate::loose::LooseMap;
use crate::types::{ContentRecord, ContentType, RecordId};
use serde::{Deserialize, Serialize};

/// One team member profile
///
/// Social links arrive as a loose map (object or JSON text); `normalize`
/// hoists the well-known networks onto the record so consumers read
/// `member.linkedin` directly instead of digging through the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    /// Stable identity
    pub id: RecordId,
    /// Full name
    pub name: String,
    /// Role title
    pub role: String,
    /// Short bio
    pub bio: String,
    /// Avatar image URL
    pub photo_url: String,
    /// Raw social links map as stored
    pub social_links: LooseMap,
    /// Hoisted from `social_links` during normalization
    pub linkedin: Option<String>,
    /// Hoisted from `social_links` during normalization
    pub github: Option<String>,
    /// Hoisted from `social_links` during normalization
    pub twitter: Option<String>,
}

impl ContentRecord for TeamMember {
    const KIND: ContentType = ContentType::TeamMember;

    fn id(&self) -> RecordId {
        self.id
    }

    fn normalize(&mut self) {
        // Explicit fields win over the map when both are present
        if self.linkedin.is_none() {
            self.linkedin = self.social_links.get("linkedin").map(str::to_string);
        }
        if self.github.is_none() {
            self.github = self.social_links.get("github").map(str::to_string);
        }
        if self.twitter.is_none() {
            self.twitter = self.social_links.get("twitter").map(str::to_string);
        }
    }
}

/// One customer testimonial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    /// Stable identity
    pub id: RecordId,
    /// Who said it
    pub author: String,
    /// Their role
    pub role: String,
    /// Their company
    pub company: String,
    /// The quote itself
    pub quote: String,
    /// Star rating, 1..=5
    pub rating: u8,
}

impl ContentRecord for Testimonial {
    const KIND: ContentType = ContentType::Testimonial;

    fn id(&self) -> RecordId {
        self.id
    }
}
