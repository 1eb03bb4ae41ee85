//! Compiled-in fallback content
//!
//! The registry answers two questions: "what does this collection show when
//! the store has nothing?" and "how does remote data combine with that?".
//! Defaults are authored as typed records and stored canonical, so they never
//! need normalization. Jobs, blog posts and projects deliberately have empty
//! defaults: an empty store means an empty page for those.

use crate::merge::MergePolicy;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use vitrine_content::{
    BrandEntry, ConfigBlob, ContentType, FaqEntry, LegalSection, LooseList, PricingPlan,
    RecordId, TeamMember, Testimonial, TimelineEvent,
};

/// Fallback content per collection, plus merge policies and config blobs
#[derive(Debug, Clone, Default)]
pub struct DefaultRegistry {
    collections: BTreeMap<ContentType, Vec<Value>>,
    configs: BTreeMap<String, ConfigBlob>,
    policies: BTreeMap<ContentType, MergePolicy>,
}

impl DefaultRegistry {
    /// Create an empty registry (every collection resolves to nothing)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry with the site's built-in content
    #[must_use]
    pub fn with_defaults() -> Self {
        BUILTINS.clone()
    }

    /// Register (or replace) a collection's defaults
    pub fn register_collection(&mut self, kind: ContentType, records: Vec<Value>) {
        self.collections.insert(kind, records);
    }

    /// Register (or replace) a default config blob
    pub fn register_config(&mut self, blob: ConfigBlob) {
        self.configs.insert(blob.key.clone(), blob);
    }

    /// Set the merge policy for a collection
    pub fn set_merge_policy(&mut self, kind: ContentType, policy: MergePolicy) {
        self.policies.insert(kind, policy);
    }

    /// Default records for a collection; `None` when the registry has no
    /// entry at all (a build-time gap, surfaced as a fault by the resolver)
    #[must_use]
    pub fn collection(&self, kind: ContentType) -> Option<&[Value]> {
        self.collections.get(&kind).map(Vec::as_slice)
    }

    /// Default config blob for a key
    #[must_use]
    pub fn config(&self, key: &str) -> Option<&ConfigBlob> {
        self.configs.get(key)
    }

    /// Merge policy for a collection, if any
    #[must_use]
    pub fn merge_policy(&self, kind: ContentType) -> Option<MergePolicy> {
        self.policies.get(&kind).copied()
    }
}

static BUILTINS: Lazy<DefaultRegistry> = Lazy::new(|| {
    let mut registry = DefaultRegistry::new();

    registry.register_collection(ContentType::Pricing, values_of(&default_pricing()));
    registry.register_collection(ContentType::Testimonial, values_of(&default_testimonials()));
    registry.register_collection(ContentType::TeamMember, values_of(&default_team()));
    registry.register_collection(ContentType::Brand, values_of(&default_brands()));
    registry.register_collection(ContentType::TimelineEvent, values_of(&default_timeline()));
    registry.register_collection(ContentType::Faq, values_of(&default_faq()));
    registry.register_collection(ContentType::LegalSection, values_of(&default_legal()));

    // Empty on purpose: these pages show nothing until the store has content
    registry.register_collection(ContentType::Job, Vec::new());
    registry.register_collection(ContentType::BlogPost, Vec::new());
    registry.register_collection(ContentType::Project, Vec::new());

    registry.set_merge_policy(ContentType::Pricing, MergePolicy::ByTitlePrefix);

    if let Some(blob) = ConfigBlob::from_value(
        "legal.privacy",
        serde_json::json!({
            "last_updated": "TBD",
            "sections": [
                {"heading": "Scope", "body": "What this policy covers."},
                {"heading": "Data we collect", "body": "Account and usage data."},
                {"heading": "Contact", "body": "privacy@vitrine.example"}
            ]
        }),
    ) {
        registry.register_config(blob);
    }

    registry
});

fn values_of<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .filter_map(|record| serde_json::to_value(record).ok())
        .collect()
}

fn default_pricing() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            id: RecordId::new(1),
            title: "Starter Plan".to_string(),
            plan_name: "Starter".to_string(),
            price: "$29".to_string(),
            period: "/month".to_string(),
            features: LooseList::from_iter(["1 project", "Email support", "Basic analytics"]),
            is_popular: false,
            icon: "rocket".to_string(),
            accent: "slate".to_string(),
            reveal_delay_ms: 0,
        },
        PricingPlan {
            id: RecordId::new(2),
            title: "Growth Plan".to_string(),
            plan_name: "Growth".to_string(),
            price: "$99".to_string(),
            period: "/month".to_string(),
            features: LooseList::from_iter([
                "10 projects",
                "Priority support",
                "Advanced analytics",
                "Custom domain",
            ]),
            is_popular: true,
            icon: "chart".to_string(),
            accent: "indigo".to_string(),
            reveal_delay_ms: 120,
        },
        PricingPlan {
            id: RecordId::new(3),
            title: "Enterprise Plan".to_string(),
            plan_name: "Enterprise".to_string(),
            price: "Custom".to_string(),
            period: String::new(),
            features: LooseList::from_iter([
                "Unlimited projects",
                "Dedicated manager",
                "SSO & audit logs",
                "SLA",
            ]),
            is_popular: false,
            icon: "building".to_string(),
            accent: "amber".to_string(),
            reveal_delay_ms: 240,
        },
    ]
}

fn default_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: RecordId::new(1),
            author: "Maya Lindqvist".to_string(),
            role: "CTO".to_string(),
            company: "Fjord Analytics".to_string(),
            quote: "They shipped in six weeks what we had scoped for six months.".to_string(),
            rating: 5,
        },
        Testimonial {
            id: RecordId::new(2),
            author: "Tomás Rivera".to_string(),
            role: "Head of Product".to_string(),
            company: "Solstice Labs".to_string(),
            quote: "The most responsive team we have worked with.".to_string(),
            rating: 5,
        },
        Testimonial {
            id: RecordId::new(3),
            author: "Priya Nair".to_string(),
            role: "Founder".to_string(),
            company: "Lattice Works".to_string(),
            quote: "Clear communication from kickoff to launch.".to_string(),
            rating: 4,
        },
    ]
}

fn default_team() -> Vec<TeamMember> {
    vec![
        TeamMember {
            id: RecordId::new(1),
            name: "Elena Petrova".to_string(),
            role: "Engineering Lead".to_string(),
            bio: "Distributed systems, now distributed teams.".to_string(),
            photo_url: "/assets/team/elena.webp".to_string(),
            ..TeamMember::default()
        },
        TeamMember {
            id: RecordId::new(2),
            name: "Jonas Weber".to_string(),
            role: "Design Director".to_string(),
            bio: "Interfaces that stay out of the way.".to_string(),
            photo_url: "/assets/team/jonas.webp".to_string(),
            ..TeamMember::default()
        },
        TeamMember {
            id: RecordId::new(3),
            name: "Aisha Bello".to_string(),
            role: "Delivery Manager".to_string(),
            bio: "Keeps the trains running and the scope honest.".to_string(),
            photo_url: "/assets/team/aisha.webp".to_string(),
            ..TeamMember::default()
        },
    ]
}

fn default_brands() -> Vec<BrandEntry> {
    vec![
        BrandEntry {
            id: RecordId::new(1),
            name: "Northwind".to_string(),
            logo_url: "/assets/brands/northwind.svg".to_string(),
            tier: "client".to_string(),
            link: "https://northwind.example".to_string(),
        },
        BrandEntry {
            id: RecordId::new(2),
            name: "Contoso".to_string(),
            logo_url: "/assets/brands/contoso.svg".to_string(),
            tier: "client".to_string(),
            link: "https://contoso.example".to_string(),
        },
        BrandEntry {
            id: RecordId::new(3),
            name: "Fabrikam".to_string(),
            logo_url: "/assets/brands/fabrikam.svg".to_string(),
            tier: "partner".to_string(),
            link: "https://fabrikam.example".to_string(),
        },
        BrandEntry {
            id: RecordId::new(4),
            name: "Adventure Works".to_string(),
            logo_url: "/assets/brands/adventure.svg".to_string(),
            tier: "partner".to_string(),
            link: "https://adventure.example".to_string(),
        },
    ]
}

fn default_timeline() -> Vec<TimelineEvent> {
    vec![
        TimelineEvent {
            id: RecordId::new(1),
            year: "2019".to_string(),
            title: "Founded".to_string(),
            description: "Two people, one rented desk.".to_string(),
        },
        TimelineEvent {
            id: RecordId::new(2),
            year: "2021".to_string(),
            title: "First enterprise client".to_string(),
            description: "The portfolio stopped fitting on one page.".to_string(),
        },
        TimelineEvent {
            id: RecordId::new(3),
            year: "2023".to_string(),
            title: "Team of twenty".to_string(),
            description: "Opened the second office.".to_string(),
        },
        TimelineEvent {
            id: RecordId::new(4),
            year: "2025".to_string(),
            title: "Platform launch".to_string(),
            description: "From services to product.".to_string(),
        },
    ]
}

fn default_faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            id: RecordId::new(1),
            question: "How long does a typical project take?".to_string(),
            answer: "Most engagements run six to twelve weeks.".to_string(),
            group: "general".to_string(),
        },
        FaqEntry {
            id: RecordId::new(2),
            question: "Do you offer fixed-price contracts?".to_string(),
            answer: "Yes, for well-scoped work.".to_string(),
            group: "billing".to_string(),
        },
        FaqEntry {
            id: RecordId::new(3),
            question: "Can you take over an existing codebase?".to_string(),
            answer: "We start with a paid audit week.".to_string(),
            group: "general".to_string(),
        },
    ]
}

fn default_legal() -> Vec<LegalSection> {
    vec![
        LegalSection {
            id: RecordId::new(1),
            heading: "Scope".to_string(),
            body: "What this policy covers.".to_string(),
            document: "privacy".to_string(),
        },
        LegalSection {
            id: RecordId::new(2),
            heading: "Data we collect".to_string(),
            body: "Account and usage data.".to_string(),
            document: "privacy".to_string(),
        },
        LegalSection {
            id: RecordId::new(3),
            heading: "Acceptable use".to_string(),
            body: "Rules for using the service.".to_string(),
            document: "terms".to_string(),
        },
    ]
}
