use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A collaboration grant: `user_id` may add and remove songs on `playlist_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collaboration {
    pub id: String,
    pub playlist_id: String,
    pub user_id: String,
}
