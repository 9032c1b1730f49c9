use auth::TokenPair;

use crate::domain::auth::errors::FieldViolation;
use crate::domain::auth::errors::ValidationError;
use crate::user::models::User;

/// Login request that passed structural validation.
#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    /// Check that both credentials are present.
    ///
    /// # Errors
    /// * `ValidationError` - One entry per empty field
    pub fn new(username: String, password: String) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        if username.is_empty() {
            violations.push(FieldViolation {
                field: "username",
                message: "is required",
            });
        }

        if password.is_empty() {
            violations.push(FieldViolation {
                field: "password",
                message: "is required",
            });
        }

        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        Ok(Self { username, password })
    }
}

/// Access token (possibly expired) presented with its refresh token.
#[derive(Debug, Clone)]
pub struct RefreshTokenCommand {
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful login: the account and its freshly issued tokens.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub tokens: TokenPair,
}
