use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message body of an export job on the `export:playlists` queue.
///
/// The wire format is a JSON object with exactly two string fields, so unknown
/// fields are rejected when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExportPlaylistPayload {
    pub playlist_id: String,
    pub target_email: String,
}

impl ExportPlaylistPayload {
    /// UTF-8 JSON bytes as published to the queue.
    pub fn to_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

/// The document attached to the export mail as `playlist.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlaylistExport {
    pub playlist: ExportedPlaylist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExportedPlaylist {
    pub id: String,
    pub name: String,
    pub songs: Vec<ExportedSong>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExportedSong {
    pub id: String,
    pub title: String,
    pub performer: String,
}

impl PlaylistExport {
    /// Pretty-printed JSON, the exact attachment content.
    pub fn to_attachment(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn payload_uses_camel_case_field_names() -> serde_json::Result<()> {
        let payload = ExportPlaylistPayload {
            playlist_id: "playlist-1".to_owned(),
            target_email: "someone@example.com".to_owned(),
        };

        let value: Value = serde_json::from_slice(&payload.to_body()?)?;

        assert_eq!(
            value,
            json!({"playlistId": "playlist-1", "targetEmail": "someone@example.com"})
        );
        Ok(())
    }

    #[test]
    fn payload_rejects_extra_and_missing_fields() {
        let extra = br#"{"playlistId":"p","targetEmail":"a@b.c","priority":1}"#;
        let missing = br#"{"playlistId":"p"}"#;
        let not_json = b"definitely not json";

        assert!(ExportPlaylistPayload::from_body(extra).is_err());
        assert!(ExportPlaylistPayload::from_body(missing).is_err());
        assert!(ExportPlaylistPayload::from_body(not_json).is_err());
    }

    #[test]
    fn attachment_decodes_to_the_nested_playlist_shape() -> serde_json::Result<()> {
        let export = PlaylistExport {
            playlist: ExportedPlaylist {
                id: "playlist-1".to_owned(),
                name: "Road trip".to_owned(),
                songs: vec![ExportedSong {
                    id: "song-1".to_owned(),
                    title: "A".to_owned(),
                    performer: "X".to_owned(),
                }],
            },
        };

        let attachment = export.to_attachment()?;
        let value: Value = serde_json::from_str(&attachment)?;

        assert!(attachment.contains('\n'), "attachment should be pretty-printed");
        assert_eq!(
            value,
            json!({
                "playlist": {
                    "id": "playlist-1",
                    "name": "Road trip",
                    "songs": [{"id": "song-1", "title": "A", "performer": "X"}]
                }
            })
        );
        Ok(())
    }
}
