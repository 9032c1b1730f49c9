use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use auth::TokenCodec;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RefreshTokenCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Login and refresh orchestration over the user credential store.
pub struct AuthService<UR, C = JwtHandler>
where
    UR: UserRepository,
    C: TokenCodec,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator<C>>,
}

impl<UR, C> AuthService<UR, C>
where
    UR: UserRepository,
    C: TokenCodec,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator<C>>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, C> AuthServicePort for AuthService<UR, C>
where
    UR: UserRepository,
    C: TokenCodec,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        // A name that could never have been registered cannot match an account.
        let Ok(username) = Username::new(command.username) else {
            tracing::warn!("Login failed: malformed username");
            return Err(self
                .authenticator
                .reject_unknown_subject(&command.password)
                .into());
        };

        let user = match self.repository.find_by_username(&username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::warn!(username = %username, "Login failed");
                return Err(self
                    .authenticator
                    .reject_unknown_subject(&command.password)
                    .into());
            }
            Err(e) => {
                tracing::error!(username = %username, error = %e, "Credential lookup failed");
                return Err(e.into());
            }
        };

        let tokens = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.username.as_str())
            .map_err(|e| {
                tracing::warn!(username = %username, error = %e, "Login failed");
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, username = %username, "User logged in");

        Ok(LoginOutcome { user, tokens })
    }

    async fn refresh_token(
        &self,
        command: RefreshTokenCommand,
    ) -> Result<Option<String>, AuthError> {
        let access_token = self
            .authenticator
            .refresh(&command.access_token, &command.refresh_token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Token refresh rejected");
                AuthError::from(e)
            })?;

        if access_token.is_none() {
            tracing::debug!("Access token still valid, nothing reissued");
        }

        Ok(access_token)
    }

    fn authorize(&self, token: &str) -> Result<Claims, AuthError> {
        self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            AuthError::from(e)
        })
    }
}
