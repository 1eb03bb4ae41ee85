//! Vitrine Store - fetching and resolution
//!
//! The read side of the content layer:
//! - [`ContentFetcher`]: the entire boundary to the remote content store
//! - [`DefaultRegistry`]: compiled-in fallback content per collection
//! - [`Resolver`]: fetch, normalize, merge, filter, order
//!
//! Nothing here ever surfaces an error to the caller: failures degrade to
//! defaults (or empty) and are recorded as structured [`Fault`]s on the
//! returned snapshot so the degradation stays observable and testable.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_store::{Resolver, StaticFetcher};
//! use vitrine_content::JobPosting;
//!
//! let resolver = Resolver::new(StaticFetcher::new());
//! let snapshot = resolver.resolve::<JobPosting>().await;
//! assert!(snapshot.records.is_empty()); // jobs carry no defaults, by design
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod error;
pub mod fetch;
pub mod merge;
pub mod registry;
pub mod resolve;

// Re-exports for convenience
pub use error::{Fault, FetchError};
pub use fetch::{ContentFetcher, JsonDirFetcher, StaticFetcher};
pub use merge::MergePolicy;
pub use registry::DefaultRegistry;
pub use resolve::{CategoryFilter, ConfigSnapshot, Origin, Resolver, Snapshot};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the store
    pub use crate::{
        CategoryFilter, ContentFetcher, DefaultRegistry, Origin, Resolver, Snapshot,
        StaticFetcher,
    };
}
