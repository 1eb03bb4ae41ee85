//! Testing utilities for the Vitrine workspace
//!
//! Shared fixture payloads shaped like real remote-store responses.

#![allow(missing_docs)]

use serde_json::{json, Value};
use vitrine_content::ContentType;

/// Job payloads covering both loose list encodings
pub fn job_payloads() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Backend Engineer",
            "department": "Engineering",
            "location": "Remote",
            "job_type": "full-time",
            "skills": "React, Node, SQL",
            "responsibilities": r#"["Own services","Review code"]"#,
            "qualifications": "3+ years"
        }),
        json!({
            "id": 2,
            "title": "Product Designer",
            "department": "Design",
            "location": "Berlin",
            "job_type": "part-time",
            "skills": r#"["Figma","Prototyping"]"#
        }),
    ]
}

/// FAQ payloads mixing categories and one uncategorized entry
pub fn mixed_faq_payloads() -> Vec<Value> {
    vec![
        json!({"id": 1, "question": "Refunds?", "answer": "Within 30 days.", "group": "billing"}),
        json!({"id": 2, "question": "Uptime?", "answer": "99.9%.", "group": "general"}),
        json!({"id": 3, "question": "Invoices?", "answer": "Monthly.", "group": "Billing"}),
        json!({"id": 4, "question": "Uncategorized?", "answer": "Yes."}),
    ]
}

/// A remote pricing entry that matches the "Growth" default by prefix
pub fn remote_growth_plan() -> Value {
    json!({
        "name": "Growth Unlimited 2025",
        "price": "$119",
        "plan_name": "Growth+",
        "features": "Everything in Starter, Unlimited seats",
        "is_popular": true
    })
}

/// Brand payloads delivered out of id order, with string ids
pub fn unordered_brand_payloads() -> Vec<Value> {
    vec![
        json!({"id": "30", "name": "Gamma", "tier": "client"}),
        json!({"id": 10, "name": "Alpha", "tier": "partner"}),
        json!({"id": "20", "name": "Beta", "tier": "client"}),
    ]
}

/// A lead inquiry record as captured by the contact modal
pub fn lead(email: &str) -> Value {
    json!({
        "email": email,
        "message": "Interested in the Growth plan",
        "source": "pricing-modal"
    })
}

/// The store-side string for a content type (handy for file fixtures)
pub fn collection_file_name(kind: ContentType) -> String {
    format!("{kind}.json")
}
