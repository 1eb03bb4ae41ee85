//! Typed record structs, one per collection
//!
//! Every struct is serde-tolerant: missing fields default, loose list/map
//! fields go through [`crate::loose`], ids accept numbers or numeric strings.

mod hiring;
mod people;
mod pricing;
mod publishing;
mod site;

pub use hiring::JobPosting;
pub use people::{TeamMember, Testimonial};
pub use pricing::PricingPlan;
pub use publishing::{BlogPost, BrandEntry, ProjectEntry};
pub use site::{FaqEntry, LegalSection, TimelineEvent};
