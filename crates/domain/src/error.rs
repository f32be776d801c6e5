//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomeDeckError`] via `#[from]` (domain errors) or by boxing into
//! [`HomeDeckError::Storage`] (adapter errors).

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum HomeDeckError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Any failure of the backing store, local or remote.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("identifier must not be empty")]
    EmptyId,

    #[error("action must not be empty")]
    EmptyAction,

    #[error("unknown device type {0:?}")]
    UnknownDeviceType(String),

    #[error("invalid status field {field:?}: {reason}")]
    InvalidStatus { field: String, reason: String },

    #[error("brightness {0:?} is not an integer")]
    InvalidBrightness(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
