use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are deliberately not broken down: a bad segment
/// count, a signature mismatch, an undecodable payload and an expired token
/// all surface as `InvalidOrExpired`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid or expired token")]
    InvalidOrExpired,
}
