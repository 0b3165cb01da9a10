use auth::extract_bearer_token;
use auth::AuthorizationError;
use auth::Principal;
use auth::TokenClass;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl From<Principal> for AuthenticatedUser {
    fn from(principal: Principal) -> Self {
        Self {
            user_id: principal.subject_id,
        }
    }
}

/// Middleware that requires a valid access token and binds its subject to the request
pub async fn require_access(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authorize_request(&state, &req).map_err(|e| {
        match e {
            AuthorizationError::MissingSigningSecret => {
                tracing::error!("JWT secret not configured; rejecting authenticated route")
            }
            _ => tracing::warn!(error = %e, "Authorization failed"),
        }
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware that binds the subject of a valid access token when one is
/// presented, and otherwise lets the request through unauthenticated
pub async fn optional_access(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.headers().contains_key(http::header::AUTHORIZATION) {
        match authorize_request(&state, &req) {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Continuing without authentication");
            }
        }
    }

    next.run(req).await
}

fn authorize_request(
    state: &AppState,
    req: &Request,
) -> Result<AuthenticatedUser, AuthorizationError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = extract_bearer_token(header)?;

    let authenticator = state
        .authenticator
        .as_ref()
        .ok_or(AuthorizationError::MissingSigningSecret)?;

    authenticator
        .authorize(token, TokenClass::Access)
        .map(AuthenticatedUser::from)
}
