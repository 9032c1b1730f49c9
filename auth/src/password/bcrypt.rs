use super::errors::PasswordError;

/// Work factor baked into every hash this crate produces.
pub const HASH_COST: u32 = 10;

/// Password hashing implementation.
///
/// Salted bcrypt with a fixed cost. The cost and salt are embedded in the
/// hash string, so verification needs nothing but the stored hash.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// Every call draws a fresh salt, so hashing the same password twice
    /// yields different strings that both verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$10$...`)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        ::bcrypt::hash(password, HASH_COST).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored bcrypt hash (`$2a$`, `$2b$`, `$2x$` or `$2y$`)
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        ::bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
