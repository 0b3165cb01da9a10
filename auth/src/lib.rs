//! Authentication core for Todo Garden
//!
//! Stateless building blocks shared by the HTTP services:
//! - Password hashing (PBKDF2-HMAC-SHA256, optionally Argon2id)
//! - HS256 token issuance and verification with access/refresh classes
//! - Bearer header extraction and class-aware authorization
//!
//! Nothing here touches storage or HTTP; callers own persistence and
//! choose the status codes.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! assert!(!hasher.verify("my_password", "not-base64!"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningSecret, TokenClass, TokenService};
//!
//! let secret = SigningSecret::new("secret_key").unwrap();
//! let tokens = TokenService::new();
//! let token = tokens.issue("user123", &secret, TokenClass::Access).unwrap();
//! let verified = tokens.verify(&token, &secret).unwrap();
//! assert_eq!(verified.subject_id, "user123");
//! ```
//!
//! ## Protecting a Route
//! ```
//! use auth::{extract_bearer_token, Authenticator, SigningSecret, TokenClass};
//!
//! let auth = Authenticator::new(SigningSecret::new("secret_key").unwrap());
//! let pair = auth.issue_token_pair("user123").unwrap();
//!
//! let header = format!("Bearer {}", pair.access_token);
//! let token = extract_bearer_token(Some(&header)).unwrap();
//! let principal = auth.authorize(token, TokenClass::Access).unwrap();
//! assert_eq!(principal.subject_id, "user123");
//! ```

pub mod authenticator;
pub mod bearer;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::AuthorizationError;
pub use authenticator::Principal;
pub use authenticator::TokenPair;
pub use bearer::extract_bearer_token;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::SigningSecret;
pub use jwt::TokenClass;
pub use jwt::TokenService;
pub use jwt::VerifiedToken;
pub use password::KeyDerivation;
pub use password::PasswordError;
pub use password::PasswordHasher;
