use crate::api::access::guard::PlaylistRole;
use crate::database::DbError;
use thiserror::Error;

/// Why a subject was refused access to a playlist.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Playlist not found: {0}")]
    NotFound(String),

    #[error("User {subject_id} lacks role {role} on playlist {playlist_id}")]
    Forbidden {
        playlist_id: String,
        subject_id: String,
        role: PlaylistRole,
    },

    #[error("Database error while loading playlist access: {0}")]
    Database(#[from] DbError),
}
