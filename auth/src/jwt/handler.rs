use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::codec::TokenCodec;
use super::errors::JwtError;

/// Issuer stamped on tokens when the configuration does not name one.
pub const DEFAULT_ISSUER: &str = "todo-service";

/// Every HMAC variant shares the symmetric key; nothing else is accepted.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT token handler for issuing and validating bearer tokens.
///
/// Signs with HS256 and accepts any HMAC-SHA2 signature on validation.
/// The key is read once at construction and never reloaded.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `issuer` - Value of the `iss` claim on every issued token
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `MissingSigningKey` - The secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], issuer: impl ToString) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSigningKey);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.to_string(),
        })
    }

    /// Issuer stamped on tokens from this handler.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.leeway = 0;
        // Expiration is checked by hand so expired claims can be returned.
        validation.validate_exp = false;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        // Missing claims already fail deserialization into `Claims`.
        validation.required_spec_claims.clear();
        validation
    }
}

impl TokenCodec for JwtHandler {
    fn issue(&self, subject: &str, expires_at: i64) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::new(subject, &self.issuer, expires_at);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired(Box::new(claims)));
        }

        Ok(claims)
    }
}
