use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Lifetime of an access token in seconds (24 hours).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Lifetime of a refresh token in seconds (7 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Class of a token: what the bearer may use it for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Grants access to protected resources.
    #[default]
    Access,
    /// Only accepted by the refresh flow to mint a new token pair.
    Refresh,
}

impl TokenClass {
    /// Seconds between `iat` and `exp` for this class.
    pub fn lifetime_secs(self) -> i64 {
        match self {
            TokenClass::Access => ACCESS_TOKEN_TTL_SECS,
            TokenClass::Refresh => REFRESH_TOKEN_TTL_SECS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token payload.
///
/// Field names on the wire are `userId`, `type`, `iat` and `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(rename = "userId")]
    pub subject_id: String,

    /// Token class
    #[serde(rename = "type")]
    pub class: TokenClass,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create claims for `subject_id` issued at `now`, expiring per class policy.
    ///
    /// # Arguments
    /// * `subject_id` - User identifier carried as `userId`
    /// * `class` - Token class, which also selects the lifetime
    /// * `now` - Issue time (Unix timestamp)
    ///
    /// # Returns
    /// Claims with `iat = now` and `exp = now + lifetime`, saturating at `i64::MAX`
    pub fn new(subject_id: impl ToString, class: TokenClass, now: i64) -> Self {
        Self {
            subject_id: subject_id.to_string(),
            class,
            iat: Some(now),
            exp: Some(now.saturating_add(class.lifetime_secs())),
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}
