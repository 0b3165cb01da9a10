use auth::AuthenticationError;
use auth::AuthorizationError;
use auth::TokenPair;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a new access + refresh pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    if body.refresh_token.is_empty() {
        return Err(ApiError::BadRequest("Refresh token is required".to_string()));
    }

    let authenticator = state.authenticator.as_ref().ok_or_else(|| {
        tracing::error!("JWT secret not configured; cannot refresh tokens");
        ApiError::from(AuthorizationError::MissingSigningSecret)
    })?;

    let tokens = authenticator
        .refresh(&body.refresh_token)
        .map_err(|e| match e {
            AuthenticationError::Unauthorized(AuthorizationError::InvalidOrExpiredToken) => {
                tracing::warn!("Refresh rejected: invalid or expired token");
                ApiError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            _ => {
                tracing::warn!(error = %e, "Refresh rejected");
                ApiError::from(e)
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RefreshResponseData {
            tokens: tokens.into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequestBody {
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub tokens: TokenPairData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<TokenPair> for TokenPairData {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }
    }
}
