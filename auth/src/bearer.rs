use crate::authenticator::AuthorizationError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The prefix match is case-sensitive and expects exactly one space.
/// Everything after it is returned untouched, so `"Bearer  abc"` yields
/// `" abc"`, which then fails signature verification.
///
/// # Errors
/// * `MissingOrMalformedAuthorizationHeader` - Header absent or without the prefix
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthorizationError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthorizationError::MissingOrMalformedAuthorizationHeader)
}
