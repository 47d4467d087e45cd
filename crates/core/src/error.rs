//! Domain error taxonomy.
//!
//! Every fallible domain operation returns one of these variants; the api
//! crate maps them onto HTTP statuses in its `IntoResponse` impl.

use crate::types::DbId;

/// Domain-level error shared across crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a validation rule (missing/malformed field).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness constraint would be violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or unverifiable credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure. The message is for logs, not clients.
    #[error("Internal error: {0}")]
    Internal(String),
}
