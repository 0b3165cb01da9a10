use serde::Serialize;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::claims::ACCESS_TOKEN_TTL_SECS;
use crate::jwt::JwtError;
use crate::jwt::SigningSecret;
use crate::jwt::TokenClass;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the signing secret for one deployment and applies it to every
/// token operation.
#[derive(Debug, Clone)]
pub struct Authenticator<C = SystemClock> {
    password_hasher: PasswordHasher,
    token_service: TokenService<C>,
    secret: SigningSecret,
}

/// Access and refresh tokens handed to a client after login or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Subject admitted by [`Authenticator::authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject_id: String,
}

/// Login and refresh errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),
}

/// Reasons a request is refused by the authorization gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Missing or invalid Authorization header")]
    MissingOrMalformedAuthorizationHeader,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Invalid token type: expected {expected}, got {actual}")]
    TokenClassMismatch {
        expected: TokenClass,
        actual: TokenClass,
    },

    #[error("JWT secret not configured")]
    MissingSigningSecret,
}

impl Authenticator<SystemClock> {
    /// Create a new authenticator with the default password hasher.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    ///
    /// # Returns
    /// Authenticator using PBKDF2 and the system clock
    pub fn new(secret: SigningSecret) -> Self {
        Self::with_parts(PasswordHasher::new(), TokenService::new(), secret)
    }
}

impl<C: Clock> Authenticator<C> {
    /// Create an authenticator from explicit parts.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher with the deployment's key derivation
    /// * `token_service` - Token service with its clock
    /// * `secret` - Secret key for token signing
    pub fn with_parts(
        password_hasher: PasswordHasher,
        token_service: TokenService<C>,
        secret: SigningSecret,
    ) -> Self {
        Self {
            password_hasher,
            token_service,
            secret,
        }
    }

    /// Underlying token service.
    pub fn token_service(&self) -> &TokenService<C> {
        &self.token_service
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Digest string to persist
    ///
    /// # Errors
    /// * `HashingFailed` - Key derivation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against its stored digest. Malformed digests yield `false`.
    pub fn verify_password(&self, password: &str, stored_digest: &str) -> bool {
        self.password_hasher.verify(password, stored_digest)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_digest` - Digest stored for the subject
    /// * `subject_id` - User identifier to put in the tokens
    ///
    /// # Returns
    /// Fresh access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the digest is unusable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        subject_id: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_digest) {
            tracing::debug!(subject_id = %subject_id, "Password mismatch");
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(subject_id)?)
    }

    /// Issue a fresh access + refresh pair without password verification.
    ///
    /// For flows where the subject has already been authenticated, such as
    /// right after registration.
    ///
    /// # Arguments
    /// * `subject_id` - User identifier to put in the tokens
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token_pair(&self, subject_id: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.token_service.issue_access(subject_id, &self.secret)?,
            refresh_token: self.token_service.issue_refresh(subject_id, &self.secret)?,
            expires_in: ACCESS_TOKEN_TTL_SECS,
        })
    }

    /// Admit a token for a context that expects `expected` class tokens.
    ///
    /// Cryptographic validity is established before the class is compared.
    ///
    /// # Arguments
    /// * `token` - Bearer token string
    /// * `expected` - Class the calling context accepts
    ///
    /// # Returns
    /// Principal naming the token's subject
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - Any verification failure
    /// * `TokenClassMismatch` - Valid token of the other class
    pub fn authorize(
        &self,
        token: &str,
        expected: TokenClass,
    ) -> Result<Principal, AuthorizationError> {
        let verified = self
            .token_service
            .verify(token, &self.secret)
            .map_err(|_| AuthorizationError::InvalidOrExpiredToken)?;

        if verified.class != expected {
            return Err(AuthorizationError::TokenClassMismatch {
                expected,
                actual: verified.class,
            });
        }

        Ok(Principal {
            subject_id: verified.subject_id,
        })
    }

    /// Exchange a refresh token for a new token pair for the same subject.
    ///
    /// # Arguments
    /// * `refresh_token` - Token previously issued with the refresh class
    ///
    /// # Returns
    /// Fresh access and refresh tokens
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired or not a refresh token
    /// * `JwtError` - Token generation failed
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthenticationError> {
        let principal = self.authorize(refresh_token, TokenClass::Refresh)?;
        Ok(self.issue_token_pair(&principal.subject_id)?)
    }
}
