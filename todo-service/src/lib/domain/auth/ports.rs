use async_trait::async_trait;
use auth::Claims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RefreshTokenCommand;

/// Port for login, token refresh and bearer checks.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `LoginFailed` - Unknown username or wrong password (indistinguishable)
    /// * `Infrastructure` - Credential store or signing failure
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Exchange an expired access token for a new one.
    ///
    /// # Returns
    /// The new access token, or `None` when the presented one is still valid
    ///
    /// # Errors
    /// * `TokenExpired` - Refresh token has expired
    /// * `TokenInvalid` - Refresh token invalid, or access token invalid for
    ///   a reason other than expiry
    /// * `Infrastructure` - Signing failure
    async fn refresh_token(&self, command: RefreshTokenCommand)
        -> Result<Option<String>, AuthError>;

    /// Validate a bearer token taken from a request.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `TokenInvalid` - Signature, structure or time bounds check failed
    fn authorize(&self, token: &str) -> Result<Claims, AuthError>;
}
