//! Error types for bindings

/// Binding lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// `mount` called on a binding that is already mounted
    #[error("binding is already mounted")]
    AlreadyMounted,
}
