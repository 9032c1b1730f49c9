use std::fmt;

use auth::AuthenticationError;
use auth::JwtError;
use thiserror::Error;

use crate::user::errors::UserError;

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Structurally malformed input, listing every offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "validation failed: {}", details)
    }
}

/// Closed set of outcomes for login, refresh and bearer checks.
///
/// Messages are safe to return to clients except for `Infrastructure`,
/// whose detail stays in the server log.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Unknown username and wrong password both end up here.
    #[error("invalid username or password")]
    LoginFailed,

    #[error("missing bearer token")]
    BearerMissing,

    #[error("invalid token")]
    TokenInvalid,

    #[error("token expired")]
    TokenExpired,

    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::LoginFailed,
            AuthenticationError::RefreshTokenRejected(JwtError::TokenExpired(_)) => {
                AuthError::TokenExpired
            }
            AuthenticationError::RefreshTokenRejected(_)
            | AuthenticationError::AccessTokenRejected(_) => AuthError::TokenInvalid,
            AuthenticationError::PasswordError(e) => AuthError::Infrastructure(e.to_string()),
            AuthenticationError::JwtError(e) => AuthError::Infrastructure(e.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired(_) => AuthError::TokenExpired,
            JwtError::InvalidToken(_) => AuthError::TokenInvalid,
            JwtError::MissingSigningKey
            | JwtError::EncodingFailed(_)
            | JwtError::ExpiryOutOfRange => {
                AuthError::Infrastructure(err.to_string())
            }
        }
    }
}

/// Credential store failures other than a missing account.
impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        AuthError::Infrastructure(err.to_string())
    }
}
