use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Represents the claims contained within an access token.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthClaims {
    pub user_id: String, // Subject
    pub exp: i64,        // Expiration time
}
