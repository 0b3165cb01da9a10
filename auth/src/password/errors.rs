use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored digest is not valid base64 or does not hold `salt ‖ key`.
    #[error("Malformed credential digest: {0}")]
    MalformedDigest(String),
}
