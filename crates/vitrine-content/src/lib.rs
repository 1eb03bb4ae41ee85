//! Vitrine Content Model
//!
//! Typed content records and tolerant field normalization.
//!
//! # Core Concepts
//!
//! - [`ContentType`]: discriminant for every collection the remote store serves
//! - [`ContentRecord`]: trait implemented by each typed record struct
//! - [`LooseField`]: tagged result of parsing a loosely-serialized field
//! - [`LooseList`] / [`LooseMap`]: tolerant serde newtypes for list/map fields
//! - [`ConfigBlob`]: a single named, opaque JSON configuration object
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_content::{loose::normalize_list, records::JobPosting};
//!
//! // "React, Node, SQL" and "[\"React\",\"Node\",\"SQL\"]" normalize the same
//! let job: JobPosting = serde_json::from_value(payload)?;
//! assert_eq!(job.skills.as_slice(), ["React", "Node", "SQL"]);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod loose;
pub mod records;
pub mod types;

// Re-exports for convenience
pub use config::ConfigBlob;
pub use error::ContentError;
pub use loose::{normalize_list, normalize_map, LooseField, LooseList, LooseMap};
pub use records::{
    BlogPost, BrandEntry, FaqEntry, JobPosting, LegalSection, PricingPlan, ProjectEntry,
    TeamMember, Testimonial, TimelineEvent,
};
pub use types::{ContentRecord, ContentType, RecordId};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Vitrine content
    pub use crate::{
        ConfigBlob, ContentRecord, ContentType, LooseList, LooseMap, RecordId,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
