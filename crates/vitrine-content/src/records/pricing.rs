//! Pricing plan records
//!
//! Pricing is the one collection where defaults and remote records merge
//! rather than replace: the compiled-in defaults own UI-only presentation
//! fields (icon, accent, reveal delay) that the remote store knows nothing
//! about, while the store owns price, display name, features and popularity.

use crate::loose::LooseList;
use crate::types::{ContentRecord, ContentType, RecordId};
use serde::{Deserialize, Serialize};

/// One pricing plan card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPlan {
    /// Stable identity
    pub id: RecordId,
    /// Authored title; its first word drives merge matching against the
    /// remote `name` field
    #[serde(alias = "name")]
    pub title: String,
    /// Display name shown on the card (falls back to `title` when empty)
    pub plan_name: String,
    /// Price text as authored ("$49", "Custom", ...)
    pub price: String,
    /// Billing period label ("/month", "/year", ...)
    pub period: String,
    /// Feature bullet list; arrives loose from the store
    pub features: LooseList,
    /// Highlighted-plan flag
    pub is_popular: bool,
    /// UI-only: icon identifier, owned by the defaults
    pub icon: String,
    /// UI-only: accent/styling hook, owned by the defaults
    pub accent: String,
    /// UI-only: entrance animation delay, owned by the defaults
    pub reveal_delay_ms: u64,
}

impl PricingPlan {
    /// Display name, falling back to the authored title
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.plan_name.is_empty() {
            &self.title
        } else {
            &self.plan_name
        }
    }

    /// First word of the authored title, lowercased
    ///
    /// This is the merge key: a remote plan matches this default when its
    /// name contains this word case-insensitively.
    #[must_use]
    pub fn title_prefix(&self) -> Option<String> {
        self.title
            .split_whitespace()
            .next()
            .map(str::to_lowercase)
    }
}

impl ContentRecord for PricingPlan {
    const KIND: ContentType = ContentType::Pricing;

    fn id(&self) -> RecordId {
        self.id
    }
}
