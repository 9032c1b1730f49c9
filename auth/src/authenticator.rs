use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default access token lifetime.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Default refresh token lifetime (30 days).
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 720;

/// Well-formed cost-10 bcrypt hash that no login password is expected to match.
///
/// Verified against when the account does not exist, so an unknown username
/// costs the same bcrypt work as a wrong password.
const PLACEHOLDER_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Authentication coordinator combining password verification and token issuance.
///
/// Generic over the token codec so the signing side can be replaced in tests.
pub struct Authenticator<C: TokenCodec = JwtHandler> {
    password_hasher: PasswordHasher,
    token_codec: C,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

/// Tokens issued on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub access_token_expires_at: i64,
    pub refresh_token: String,
    pub refresh_token_expires_at: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Refresh token rejected: {0}")]
    RefreshTokenRejected(JwtError),

    #[error("Access token rejected: {0}")]
    AccessTokenRejected(JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl<C: TokenCodec> Authenticator<C> {
    /// Create a new authenticator with the default token lifetimes.
    ///
    /// # Arguments
    /// * `token_codec` - Codec used to sign and verify tokens
    pub fn new(token_codec: C) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
            access_token_ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            refresh_token_ttl: Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        }
    }

    /// Override the access and refresh token lifetimes.
    pub fn with_token_lifetimes(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_token_ttl = access;
        self.refresh_token_ttl = refresh;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Username to embed as the subject claim
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(subject)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Runs a full bcrypt verification against a placeholder hash before
    /// answering `InvalidCredentials`, matching the wrong-password path.
    pub fn reject_unknown_subject(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, PLACEHOLDER_HASH);
        AuthenticationError::InvalidCredentials
    }

    /// Issue an access/refresh pair without password verification.
    ///
    /// # Errors
    /// * `ExpiryOutOfRange` - A configured lifetime overflows the clock
    /// * `JwtError` - Token generation failed
    pub fn issue_token_pair(&self, subject: &str) -> Result<TokenPair, JwtError> {
        let access_token_expires_at = expires_at(self.access_token_ttl)?;
        let refresh_token_expires_at = expires_at(self.refresh_token_ttl)?;

        Ok(TokenPair {
            access_token: self.token_codec.issue(subject, access_token_expires_at)?,
            access_token_expires_at,
            refresh_token: self.token_codec.issue(subject, refresh_token_expires_at)?,
            refresh_token_expires_at,
        })
    }

    /// Exchange an expired access token for a fresh one.
    ///
    /// The refresh token must validate outright. The access token is then
    /// inspected: if it is still valid nothing is issued and `None` comes
    /// back; if it is expired but authentic, a new access token is issued for
    /// its subject; any other state is rejected.
    ///
    /// # Errors
    /// * `RefreshTokenRejected` - Refresh token expired or invalid
    /// * `AccessTokenRejected` - Access token invalid for a reason other than expiry
    /// * `JwtError` - Token generation failed
    pub fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<String>, AuthenticationError> {
        self.token_codec
            .validate(refresh_token)
            .map_err(AuthenticationError::RefreshTokenRejected)?;

        match self.token_codec.validate(access_token) {
            Ok(_) => Ok(None),
            Err(JwtError::TokenExpired(claims)) => {
                let expires_at = expires_at(self.access_token_ttl)?;
                let access_token = self.token_codec.issue(&claims.sub, expires_at)?;
                Ok(Some(access_token))
            }
            Err(e) => Err(AuthenticationError::AccessTokenRejected(e)),
        }
    }

    /// Validate a bearer token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Token expired or invalid
    pub fn validate_token(&self, token: &str) -> Result<crate::jwt::Claims, JwtError> {
        self.token_codec.validate(token)
    }
}

fn expires_at(ttl: Duration) -> Result<i64, JwtError> {
    Utc::now()
        .checked_add_signed(ttl)
        .map(|at| at.timestamp())
        .ok_or(JwtError::ExpiryOutOfRange)
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::jwt::codec::MockTokenCodec;
    use crate::jwt::Claims;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Authenticator {
        Authenticator::new(JwtHandler::new(SECRET, "todo-service").unwrap())
    }

    fn expired_claims(subject: &str) -> Claims {
        Claims::new(subject, "todo-service", Utc::now().timestamp() - 60)
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("rahasia")
            .expect("Failed to hash password");

        let tokens = authenticator
            .authenticate("rahasia", &hash, "budi")
            .expect("Authentication failed");

        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_ne!(tokens.access_token, tokens.refresh_token);
        assert!(tokens.access_token_expires_at < tokens.refresh_token_expires_at);

        let access = authenticator.validate_token(&tokens.access_token).unwrap();
        let refresh = authenticator.validate_token(&tokens.refresh_token).unwrap();
        assert_eq!(access.sub, "budi");
        assert_eq!(refresh.sub, "budi");
        assert_eq!(access.exp, tokens.access_token_expires_at);
        assert_eq!(refresh.exp, tokens.refresh_token_expires_at);
    }

    #[test]
    fn test_default_token_lifetimes() {
        let before = Utc::now().timestamp();
        let tokens = authenticator().issue_token_pair("budi").unwrap();

        let access_ttl = tokens.access_token_expires_at - before;
        let refresh_ttl = tokens.refresh_token_expires_at - before;
        assert!((15 * 60..=15 * 60 + 1).contains(&access_ttl));
        assert!((720 * 3600..=720 * 3600 + 1).contains(&refresh_ttl));
    }

    #[test]
    fn test_oversized_lifetime_is_an_error() {
        let authenticator = authenticator().with_token_lifetimes(
            Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            Duration::hours(100_000_000_000),
        );

        let result = authenticator.issue_token_pair("budi");
        assert!(matches!(result, Err(JwtError::ExpiryOutOfRange)));

        let hash = authenticator.hash_password("rahasia").unwrap();
        let result = authenticator.authenticate("rahasia", &hash, "budi");
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::ExpiryOutOfRange))
        ));
    }

    #[test]
    fn test_oversized_lifetime_on_refresh_is_an_error() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_token_pair("budi").unwrap();
        let expired = authenticator
            .token_codec
            .issue("budi", Utc::now().timestamp() - 60)
            .unwrap();

        let authenticator = authenticator.with_token_lifetimes(
            Duration::hours(100_000_000_000),
            Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        );

        let result = authenticator.refresh(&expired, &tokens.refresh_token);
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::ExpiryOutOfRange))
        ));
    }

    #[test]
    fn test_placeholder_hash_is_verifiable() {
        let result = PasswordHasher::new().verify("rahasia", PLACEHOLDER_HASH);
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn test_reject_unknown_subject() {
        assert!(matches!(
            authenticator().reject_unknown_subject("rahasia"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("rahasia").unwrap();

        let result = authenticator.authenticate("wrong", &hash, "budi");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let result = authenticator().authenticate("rahasia", "not-a-hash", "budi");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_refresh_with_valid_access_token_issues_nothing() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_token_pair("budi").unwrap();

        let result = authenticator
            .refresh(&tokens.access_token, &tokens.refresh_token)
            .expect("Refresh failed");
        assert!(result.is_none());
    }

    #[test]
    fn test_refresh_with_expired_access_token() {
        let authenticator = authenticator().with_token_lifetimes(
            Duration::minutes(-5),
            Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        );
        let tokens = authenticator.issue_token_pair("budi").unwrap();

        // Back to normal lifetimes for the reissued token.
        let authenticator = authenticator.with_token_lifetimes(
            Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
            Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        );

        let access_token = authenticator
            .refresh(&tokens.access_token, &tokens.refresh_token)
            .expect("Refresh failed")
            .expect("Expected a new access token");

        let claims = authenticator.validate_token(&access_token).unwrap();
        assert_eq!(claims.sub, "budi");
    }

    #[test]
    fn test_refresh_with_expired_refresh_token() {
        let expired = authenticator()
            .with_token_lifetimes(Duration::minutes(-5), Duration::minutes(-5))
            .issue_token_pair("budi")
            .unwrap();
        let authenticator = authenticator();
        let access_token = authenticator.issue_token_pair("budi").unwrap().access_token;

        for access in [access_token.as_str(), expired.access_token.as_str(), "garbage"] {
            let result = authenticator.refresh(access, &expired.refresh_token);
            assert!(matches!(
                result,
                Err(AuthenticationError::RefreshTokenRejected(JwtError::TokenExpired(_)))
            ));
        }
    }

    #[test]
    fn test_refresh_with_invalid_refresh_token() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_token_pair("budi").unwrap();

        let result = authenticator.refresh(&tokens.access_token, "invalid.token.here");
        assert!(matches!(
            result,
            Err(AuthenticationError::RefreshTokenRejected(JwtError::InvalidToken(_)))
        ));
    }

    #[test]
    fn test_refresh_with_invalid_access_token() {
        let authenticator = authenticator();
        let tokens = authenticator.issue_token_pair("budi").unwrap();

        let result = authenticator.refresh("invalid.token.here", &tokens.refresh_token);
        assert!(matches!(
            result,
            Err(AuthenticationError::AccessTokenRejected(JwtError::InvalidToken(_)))
        ));
    }

    #[test]
    fn test_refresh_validates_refresh_token_first() {
        let mut codec = MockTokenCodec::new();

        codec
            .expect_validate()
            .with(eq("refresh"))
            .times(1)
            .returning(|_| Err(JwtError::InvalidToken("bad signature".to_string())));
        codec.expect_validate().with(eq("access")).times(0);
        codec.expect_issue().times(0);

        let authenticator = Authenticator::new(codec);

        let result = authenticator.refresh("access", "refresh");
        assert!(matches!(
            result,
            Err(AuthenticationError::RefreshTokenRejected(_))
        ));
    }

    #[test]
    fn test_refresh_reissues_for_expired_subject() {
        let mut codec = MockTokenCodec::new();

        codec
            .expect_validate()
            .with(eq("refresh"))
            .times(1)
            .returning(|_| Ok(Claims::new("budi", "todo-service", i64::MAX)));
        codec
            .expect_validate()
            .with(eq("access"))
            .times(1)
            .returning(|_| Err(JwtError::TokenExpired(Box::new(expired_claims("budi")))));
        codec
            .expect_issue()
            .withf(|subject, expires_at| {
                let expected = Utc::now().timestamp() + ACCESS_TOKEN_TTL_MINUTES * 60;
                subject == "budi" && (expected - 1..=expected).contains(expires_at)
            })
            .times(1)
            .returning(|_, _| Ok("new-access".to_string()));

        let authenticator = Authenticator::new(codec);

        let result = authenticator.refresh("access", "refresh").unwrap();
        assert_eq!(result.as_deref(), Some("new-access"));
    }

    #[test]
    fn test_refresh_issue_failure_propagates() {
        let mut codec = MockTokenCodec::new();

        codec
            .expect_validate()
            .with(eq("refresh"))
            .returning(|_| Ok(Claims::new("budi", "todo-service", i64::MAX)));
        codec
            .expect_validate()
            .with(eq("access"))
            .returning(|_| Err(JwtError::TokenExpired(Box::new(expired_claims("budi")))));
        codec
            .expect_issue()
            .returning(|_, _| Err(JwtError::EncodingFailed("boom".to_string())));

        let authenticator = Authenticator::new(codec);

        let result = authenticator.refresh("access", "refresh");
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::EncodingFailed(_)))
        ));
    }
}
