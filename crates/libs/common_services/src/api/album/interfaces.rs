use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumLikesResponse {
    pub likes: i64,
}

/// Where a like count was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeSource {
    Cache,
    Database,
}

impl LikeSource {
    #[must_use]
    pub const fn as_header_value(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Database => "database",
        }
    }
}
