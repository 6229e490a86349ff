//! Error types for the in-memory scene runtime.

/// Errors raised while building or loading an in-memory stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// Prim paths must be absolute (`/root/child`).
    #[error("invalid prim path '{0}': paths must start with '/' and contain no empty segments")]
    InvalidPath(String),

    /// A prim with this path is already on the stage.
    #[error("prim '{0}' is already defined on the stage")]
    DuplicatePrim(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
