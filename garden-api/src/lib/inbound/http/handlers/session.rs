use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn session(
    user: Option<Extension<AuthenticatedUser>>,
) -> ApiSuccess<SessionResponseData> {
    let user_id = user.map(|Extension(user)| user.user_id);

    ApiSuccess::new(
        StatusCode::OK,
        SessionResponseData {
            authenticated: user_id.is_some(),
            user_id,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub authenticated: bool,
    pub user_id: Option<String>,
}
