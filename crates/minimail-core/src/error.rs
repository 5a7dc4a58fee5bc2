//! Error types for the core library.

use thiserror::Error;

use crate::account::AccountError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Account operation rejected.
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl Error {
    /// Returns true if the error is a rejected user request rather than a
    /// storage fault. Recoverable errors leave all state unchanged.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Account(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
