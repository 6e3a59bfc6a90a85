use crate::routes::{album, collaboration, export, playlist, root};
use common_services::api::album::interfaces::AlbumLikesResponse;
use common_services::api::collaboration::interfaces::{
    CollaborationCreatedResponse, CollaborationRequest,
};
use common_services::api::export::interfaces::{ExportPlaylistRequest, ExportRequestAccepted};
use common_services::api::playlist::interfaces::{
    CreatePlaylistRequest, MessageResponse, PlaylistActivitiesResponse, PlaylistCreatedResponse,
    PlaylistDetails, PlaylistSongRequest, PlaylistSongsResponse, PlaylistsResponse,
};
use common_services::database::activity::PlaylistActivity;
use common_services::database::collaboration::Collaboration;
use common_services::database::playlist::PlaylistSummary;
use common_services::database::song::SongSummary;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        // Playlist handlers
        playlist::handlers::create_playlist_handler,
        playlist::handlers::list_playlists_handler,
        playlist::handlers::delete_playlist_handler,
        playlist::handlers::add_song_handler,
        playlist::handlers::get_playlist_songs_handler,
        playlist::handlers::remove_song_handler,
        playlist::handlers::get_activities_handler,
        // Collaboration handlers
        collaboration::handlers::add_collaborator_handler,
        collaboration::handlers::remove_collaborator_handler,
        collaboration::handlers::list_collaborators_handler,
        // Export handlers
        export::handlers::export_playlist_handler,
        // Album handlers
        album::handlers::like_album_handler,
        album::handlers::unlike_album_handler,
        album::handlers::get_album_likes_handler,
    ),
    components(
        schemas(
            CreatePlaylistRequest,
            PlaylistCreatedResponse,
            PlaylistsResponse,
            PlaylistSummary,
            PlaylistSongRequest,
            PlaylistSongsResponse,
            PlaylistDetails,
            SongSummary,
            PlaylistActivitiesResponse,
            PlaylistActivity,
            MessageResponse,
            CollaborationRequest,
            CollaborationCreatedResponse,
            Collaboration,
            ExportPlaylistRequest,
            ExportRequestAccepted,
            AlbumLikesResponse,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Playlist", description = "Playlists, their songs and activity history"),
        (name = "Collaboration", description = "Granting and revoking playlist collaborators"),
        (name = "Export", description = "Mailing playlist exports"),
        (name = "Album", description = "Album likes"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
