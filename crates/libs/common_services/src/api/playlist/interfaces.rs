use crate::database::activity::PlaylistActivity;
use crate::database::playlist::PlaylistSummary;
use crate::database::song::SongSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// --- Request Payloads ---

#[derive(Serialize, Deserialize, Validate, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Serialize, Deserialize, Validate, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongRequest {
    #[validate(length(min = 1))]
    pub song_id: String,
}

// --- Response Bodies ---

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistCreatedResponse {
    pub playlist_id: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistsResponse {
    pub playlists: Vec<PlaylistSummary>,
}

/// A playlist with its owner's username and current songs.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetails {
    pub id: String,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSongsResponse {
    pub playlist: PlaylistDetails,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistActivitiesResponse {
    pub playlist_id: String,
    pub activities: Vec<PlaylistActivity>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_names_and_song_ids_are_rejected() {
        let playlist = CreatePlaylistRequest {
            name: String::new(),
        };
        let song = PlaylistSongRequest {
            song_id: String::new(),
        };

        assert!(playlist.validate().is_err());
        assert!(song.validate().is_err());
    }

    #[test]
    fn song_request_reads_camel_case() {
        let request: PlaylistSongRequest =
            serde_json::from_str(r#"{"songId":"song-1"}"#).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(request.song_id, "song-1");
        assert!(request.validate().is_ok());
    }
}
