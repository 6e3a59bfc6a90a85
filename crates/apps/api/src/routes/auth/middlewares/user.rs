use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_context, extract_token};
use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use common_services::api::auth::error::AuthError;
use common_services::api::auth::token::decode_access_token;

/// The authenticated subject of a request.
///
/// Only the token is checked here; whether the subject may touch a given
/// playlist is decided by the playlist guard.
#[derive(Clone, Debug)]
pub struct ApiUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let context = extract_context(parts, state).await?;
        let claims = decode_access_token(&token, &context.settings.secrets.jwt)?;
        let user = Self {
            user_id: claims.user_id,
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
