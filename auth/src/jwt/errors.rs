use thiserror::Error;

use super::claims::Claims;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Signing key is not configured")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Signature checked out, only the expiration is in the past.
    ///
    /// Carries the verified claims so callers can still trust the subject.
    #[error("Token is expired")]
    TokenExpired(Box<Claims>),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    /// The configured lifetime pushes the expiration past the representable range.
    #[error("Token expiration is out of range")]
    ExpiryOutOfRange,
}
