//! Authentication utilities library
//!
//! Provides the authentication core used by the todo service:
//! - Password hashing (bcrypt, fixed cost)
//! - Signed, time-bound bearer tokens (HMAC JWT)
//! - Login and refresh coordination
//!
//! The service defines its own ports around these types and maps the errors
//! at its boundary. Nothing here touches storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, TokenCodec};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", "todo-service").unwrap();
//! let expires_at = chrono::Utc::now().timestamp() + 60;
//! let token = handler.issue("budi", expires_at).unwrap();
//! let claims = handler.validate(&token).unwrap();
//! assert_eq!(claims.sub, "budi");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtHandler};
//!
//! let codec = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", "todo-service").unwrap();
//! let auth = Authenticator::new(codec);
//!
//! // Register: hash password
//! let hash = auth.hash_password("rahasia").unwrap();
//!
//! // Login: verify and issue an access/refresh pair
//! let tokens = auth.authenticate("rahasia", &hash, "budi").unwrap();
//!
//! // Refresh: a still-valid access token is left alone
//! let renewed = auth.refresh(&tokens.access_token, &tokens.refresh_token).unwrap();
//! assert!(renewed.is_none());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
