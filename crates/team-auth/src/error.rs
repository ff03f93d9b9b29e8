//! Error types for credential operations

use thiserror::Error;

/// Credential error types.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),
}

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;
