use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Identifies a collaboration grant; used both to grant and to revoke.
#[derive(Serialize, Deserialize, Validate, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    #[validate(length(min = 1))]
    pub playlist_id: String,
    #[validate(length(min = 1))]
    pub user_id: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationCreatedResponse {
    pub collaboration_id: String,
}
