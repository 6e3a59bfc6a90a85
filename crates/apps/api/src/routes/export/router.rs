use crate::api_state::ApiContext;
use crate::routes::export::handlers::export_playlist_handler;
use axum::{Router, routing::post};

pub fn export_protected_router() -> Router<ApiContext> {
    Router::new().route(
        "/export/playlists/{playlist_id}",
        post(export_playlist_handler),
    )
}
