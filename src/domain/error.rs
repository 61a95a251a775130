//! Error taxonomy raised by the chat core.

use thiserror::Error;

/// Domain errors exposed at the request boundary.
///
/// These map 1:1 to HTTP status categories (400/409/404) and are all
/// recoverable: every core operation either fully succeeds or leaves the
/// shared state untouched, so no rollback is ever needed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// A required field is missing or empty
    #[error("missing or empty field: {0}")]
    BadInput(&'static str),

    /// The username is already registered
    #[error("username '{0}' is already taken")]
    Conflict(String),

    /// The operation referenced an unknown username
    #[error("user '{0}' not found")]
    NotFound(String),
}
