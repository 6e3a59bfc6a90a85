use common_types::ExportedSong;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// The catalog fields of a song that playlists expose.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq, Eq)]
pub struct SongSummary {
    pub id: String,
    pub title: String,
    pub performer: String,
}

impl From<SongSummary> for ExportedSong {
    fn from(song: SongSummary) -> Self {
        Self {
            id: song.id,
            title: song.title,
            performer: song.performer,
        }
    }
}
