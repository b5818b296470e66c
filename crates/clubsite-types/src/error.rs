use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in clubsite-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from content management operations.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<RepositoryError> for ContentError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(msg) => ContentError::Conflict(msg),
            other => ContentError::StorageError(other.to_string()),
        }
    }
}

/// Errors from admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing fields")]
    MissingFields,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid session token")]
    InvalidToken,

    #[error("session expired")]
    Expired,

    #[error("no admin named '{0}'")]
    UnknownAdmin(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("session signing failed: {0}")]
    Signing(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from one chat turn.
///
/// `Validation` is the caller's fault; `Store` and `Gateway` are upstream
/// failures that abort the turn without a partial reply.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("content store unavailable: {0}")]
    Store(String),

    #[error("completion gateway failed: {0}")]
    Gateway(#[from] LlmError),
}

impl ChatError {
    /// Whether the failure came from a collaborator rather than the request.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, ChatError::Validation(_))
    }
}
