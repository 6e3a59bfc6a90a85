//! Access tokens are issued by the credential service; this side only verifies them.
//! [`create_access_token`] exists for tooling and tests that need a valid token.

use crate::api::auth::error::AuthError;
use crate::api::auth::interfaces::AuthClaims;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Signs an HS256 access token for `user_id` that expires after `valid_for`.
pub fn create_access_token(
    user_id: &str,
    jwt_secret: &str,
    valid_for: Duration,
) -> Result<String, AuthError> {
    let claims = AuthClaims {
        user_id: user_id.to_owned(),
        exp: (Utc::now() + valid_for).timestamp(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

/// Verifies signature and expiry and returns the claims.
pub fn decode_access_token(token: &str, jwt_secret: &str) -> Result<AuthClaims, AuthError> {
    decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}
