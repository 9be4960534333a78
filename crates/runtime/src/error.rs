//! Error types for process-wide runtime state

/// Error type for export registry operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// No export was published under the capability name
    #[error("Export not found: {0}")]
    NotFound(String),

    /// An export exists but has a different concrete type
    #[error("Export {name} is not of type {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// The capability name was already published by a module
    #[error("Export {name} already registered by module {module}")]
    AlreadyRegistered { name: String, module: String },
}

/// Error type for process-wide runtime initialization
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// Main thread already recorded
    #[error("Main thread already initialized")]
    AlreadyInitialized,
}
