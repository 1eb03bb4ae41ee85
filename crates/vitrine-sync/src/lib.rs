//! Vitrine Sync - the local write path
//!
//! Everything a client creates itself (leads, applications, cookie consent)
//! goes through here, never through the remote store:
//! - [`LocalStore`]: namespaced JSON key-value persistence
//! - [`MutationLog`]: append-only, most-recent-first record log
//! - [`ChangeBus`]: typed-topic broadcast so other mounted views re-resolve
//!
//! The log works even when persistence is unavailable: a failed write is
//! reported on the receipt and logged, and the broadcast still fires so no
//! subscriber is left waiting.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod bus;
pub mod error;
pub mod log;
pub mod store;

// Re-exports for convenience
pub use bus::{BusClosed, ChangeBus, Namespace, Subscription, Topic};
pub use error::StoreError;
pub use log::{AppendReceipt, ConsentDecision, MutationId, MutationLog, CONSENT_NAMESPACE};
pub use store::{JsonFileStore, LocalStore, MemoryStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the local write path
    pub use crate::{ChangeBus, MemoryStore, MutationLog, Namespace, Topic};
}
