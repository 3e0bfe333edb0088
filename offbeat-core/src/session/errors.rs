//! Session error types

use thiserror::Error;

/// Errors surfaced by [`SessionStore`](super::SessionStore) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The authentication collaborator rejected or failed the login.
    #[error("Authentication failed: {0}")]
    Authenticator(#[from] AuthenticatorError),

    /// The collaborator accepted the login but issued no bearer token.
    #[error("Authenticator returned a user without a token")]
    MissingToken,
}

/// Failures reported by an [`Authenticator`](super::Authenticator).
#[derive(Debug, Error)]
pub enum AuthenticatorError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Incorrect verification code")]
    IncorrectOtp,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Authentication service unavailable")]
    Unavailable,
}

/// Persistence failures. These are logged by the store, never returned from
/// its mutators.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read from storage")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write to storage")]
    WriteFailed(#[source] std::io::Error),

    #[error("Corrupted storage data")]
    CorruptedData(#[source] serde_json::Error),

    #[error("Failed to serialize session")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Unsupported storage version {0}")]
    UnsupportedVersion(u32),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
