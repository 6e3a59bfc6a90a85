use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::playlist::error::PlaylistError;
use common_services::api::playlist::interfaces::{
    CreatePlaylistRequest, MessageResponse, PlaylistActivitiesResponse, PlaylistCreatedResponse,
    PlaylistSongRequest, PlaylistSongsResponse, PlaylistsResponse,
};
use common_services::api::playlist::service::{
    add_song_to_playlist, create_playlist, delete_playlist, get_playlist_songs, list_activities,
    list_playlists, remove_song_from_playlist,
};
use tracing::instrument;
use validator::Validate;

/// Create a new playlist.
///
/// The authenticated user becomes its owner.
#[utoipa::path(
    post,
    path = "/playlists",
    tag = "Playlist",
    request_body = CreatePlaylistRequest,
    responses(
        (status = 201, description = "Playlist created.", body = PlaylistCreatedResponse),
        (status = 400, description = "Invalid playlist name."),
        (status = 401, description = "Missing or invalid token."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn create_playlist_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    payload: Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaylistCreatedResponse>), PlaylistError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let playlist = create_playlist(&context.pool, &user.user_id, &payload.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaylistCreatedResponse {
            playlist_id: playlist.id,
        }),
    ))
}

/// List the playlists the user owns or collaborates on.
#[utoipa::path(
    get,
    path = "/playlists",
    tag = "Playlist",
    responses(
        (status = 200, description = "The user's playlists.", body = PlaylistsResponse),
        (status = 401, description = "Missing or invalid token."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn list_playlists_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
) -> Result<Json<PlaylistsResponse>, PlaylistError> {
    let playlists = list_playlists(&context.pool, &user.user_id).await?;
    Ok(Json(PlaylistsResponse { playlists }))
}

/// Delete a playlist.
///
/// Collaborations, song entries and activities are removed with it.
#[utoipa::path(
    delete,
    path = "/playlists/{playlist_id}",
    tag = "Playlist",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    responses(
        (status = 200, description = "Playlist deleted.", body = MessageResponse),
        (status = 403, description = "User is not the owner."),
        (status = 404, description = "Playlist not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn delete_playlist_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
) -> Result<Json<MessageResponse>, PlaylistError> {
    delete_playlist(&context.pool, &playlist_id, &user.user_id).await?;
    Ok(Json(MessageResponse::new("Playlist deleted")))
}

/// Add a song to a playlist.
#[utoipa::path(
    post,
    path = "/playlists/{playlist_id}/songs",
    tag = "Playlist",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    request_body = PlaylistSongRequest,
    responses(
        (status = 201, description = "Song added.", body = MessageResponse),
        (status = 400, description = "Invalid song ID."),
        (status = 403, description = "User is neither owner nor collaborator."),
        (status = 404, description = "Playlist or song not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn add_song_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
    payload: Result<Json<PlaylistSongRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), PlaylistError> {
    let Json(payload) = payload?;
    payload.validate()?;
    add_song_to_playlist(&context.pool, &playlist_id, &payload.song_id, &user.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Song added to playlist")),
    ))
}

/// Get a playlist with its songs.
#[utoipa::path(
    get,
    path = "/playlists/{playlist_id}/songs",
    tag = "Playlist",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    responses(
        (status = 200, description = "The playlist and its songs.", body = PlaylistSongsResponse),
        (status = 403, description = "User is neither owner nor collaborator."),
        (status = 404, description = "Playlist not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn get_playlist_songs_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
) -> Result<Json<PlaylistSongsResponse>, PlaylistError> {
    let playlist = get_playlist_songs(&context.pool, &playlist_id, &user.user_id).await?;
    Ok(Json(PlaylistSongsResponse { playlist }))
}

/// Remove a song from a playlist.
///
/// Every entry of the song is removed.
#[utoipa::path(
    delete,
    path = "/playlists/{playlist_id}/songs",
    tag = "Playlist",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    request_body = PlaylistSongRequest,
    responses(
        (status = 200, description = "Song removed.", body = MessageResponse),
        (status = 403, description = "User is neither owner nor collaborator."),
        (status = 404, description = "Playlist not found, or song not in playlist."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn remove_song_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
    payload: Result<Json<PlaylistSongRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, PlaylistError> {
    let Json(payload) = payload?;
    payload.validate()?;
    remove_song_from_playlist(&context.pool, &playlist_id, &payload.song_id, &user.user_id)
        .await?;
    Ok(Json(MessageResponse::new("Song removed from playlist")))
}

/// List the song add/remove history of a playlist, oldest first.
#[utoipa::path(
    get,
    path = "/playlists/{playlist_id}/activities",
    tag = "Playlist",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    responses(
        (status = 200, description = "Activities in time order.",
            body = PlaylistActivitiesResponse),
        (status = 403, description = "User is neither owner nor collaborator."),
        (status = 404, description = "Playlist not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn get_activities_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
) -> Result<Json<PlaylistActivitiesResponse>, PlaylistError> {
    let activities = list_activities(&context.pool, &playlist_id, &user.user_id).await?;
    Ok(Json(PlaylistActivitiesResponse {
        playlist_id,
        activities,
    }))
}
