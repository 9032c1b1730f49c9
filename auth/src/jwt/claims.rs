use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Registered claims carried by every access and refresh token.
///
/// Both token flavors share this shape; they differ only in `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now, valid from now until `expires_at`.
    ///
    /// # Arguments
    /// * `subject` - Username the token is issued for
    /// * `issuer` - Issuer identifier
    /// * `expires_at` - Expiration as a Unix timestamp
    pub fn new(subject: impl ToString, issuer: impl ToString, expires_at: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: subject.to_string(),
            iat: now,
            nbf: now,
            iss: issuer.to_string(),
            exp: expires_at,
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
