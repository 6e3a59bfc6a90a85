use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a single playlist in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[sqlx(rename = "owner")]
    pub owner_id: String,
}

/// A playlist as listed for one of its members, with the owner's username.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// Ownership and collaboration facts for one `(playlist, subject)` pair.
///
/// Loaded fresh for every guarded operation, never cached.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct PlaylistAccess {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub is_collaborator: bool,
}

/// Row lock taken on the playlist while loading [`PlaylistAccess`] inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    None,
    /// Blocks owner-level changes (delete, grant, revoke) until the transaction ends.
    Share,
    /// Waits for in-flight collaborator mutations and blocks new ones.
    Update,
}

impl RowLock {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Share => "FOR SHARE OF p",
            Self::Update => "FOR UPDATE OF p",
        }
    }
}
