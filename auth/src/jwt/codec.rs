use super::claims::Claims;
use super::errors::JwtError;

/// Issues and verifies signed bearer tokens.
///
/// `JwtHandler` is the production implementation; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync + 'static {
    /// Sign a token for `subject` that expires at the given Unix timestamp.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    fn issue(&self, subject: &str, expires_at: i64) -> Result<String, JwtError>;

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Signature valid, expiration in the past
    /// * `InvalidToken` - Anything else: bad signature, malformed, wrong
    ///   algorithm, not yet valid
    fn validate(&self, token: &str) -> Result<Claims, JwtError>;
}
