//! Vitrine View - consumer bindings
//!
//! The lifecycle contract every page follows to consume resolved content:
//! mount resolves once, a broadcast triggers a full re-resolve, unmount stops
//! everything — including an in-flight resolve, whose result is never applied
//! to an unmounted binding. No polling, no revalidation timers: a snapshot is
//! valid until a broadcast fires or the component remounts.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod binding;
pub mod error;

pub use binding::{Binding, ConfigBinding};
pub use error::BindingError;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with bindings
    pub use crate::{Binding, BindingError, ConfigBinding};
}
