use crate::api_state::ApiContext;
use crate::routes::playlist::handlers::{
    add_song_handler, create_playlist_handler, delete_playlist_handler, get_activities_handler,
    get_playlist_songs_handler, list_playlists_handler, remove_song_handler,
};
use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn playlist_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/playlists",
            post(create_playlist_handler).get(list_playlists_handler),
        )
        .route("/playlists/{playlist_id}", delete(delete_playlist_handler))
        .route(
            "/playlists/{playlist_id}/songs",
            post(add_song_handler)
                .get(get_playlist_songs_handler)
                .delete(remove_song_handler),
        )
        .route(
            "/playlists/{playlist_id}/activities",
            get(get_activities_handler),
        )
}
