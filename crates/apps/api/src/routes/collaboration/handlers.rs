use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::collaboration::interfaces::{
    CollaborationCreatedResponse, CollaborationRequest,
};
use common_services::api::collaboration::service::{
    add_collaborator, list_collaborators, remove_collaborator,
};
use common_services::api::playlist::error::PlaylistError;
use common_services::api::playlist::interfaces::MessageResponse;
use common_services::database::collaboration::Collaboration;
use tracing::instrument;
use validator::Validate;

/// Grant a user collaboration on a playlist.
///
/// Only the playlist owner may grant. Collaborators can add and remove songs.
#[utoipa::path(
    post,
    path = "/collaborations",
    tag = "Collaboration",
    request_body = CollaborationRequest,
    responses(
        (status = 201, description = "Collaboration granted.", body = CollaborationCreatedResponse),
        (status = 403, description = "User is not the playlist owner."),
        (status = 404, description = "Playlist or user not found."),
        (status = 409, description = "User already collaborates on the playlist."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn add_collaborator_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    payload: Result<Json<CollaborationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CollaborationCreatedResponse>), PlaylistError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let collaboration = add_collaborator(
        &context.pool,
        &payload.playlist_id,
        &payload.user_id,
        &user.user_id,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(CollaborationCreatedResponse {
            collaboration_id: collaboration.id,
        }),
    ))
}

/// Revoke a user's collaboration on a playlist.
#[utoipa::path(
    delete,
    path = "/collaborations",
    tag = "Collaboration",
    request_body = CollaborationRequest,
    responses(
        (status = 200, description = "Collaboration revoked.", body = MessageResponse),
        (status = 403, description = "User is not the playlist owner."),
        (status = 404, description = "Playlist, user or collaboration not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn remove_collaborator_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    payload: Result<Json<CollaborationRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, PlaylistError> {
    let Json(payload) = payload?;
    payload.validate()?;
    remove_collaborator(
        &context.pool,
        &payload.playlist_id,
        &payload.user_id,
        &user.user_id,
    )
    .await?;
    Ok(Json(MessageResponse::new("Collaboration removed")))
}

/// List the collaboration grants of a playlist.
#[utoipa::path(
    get,
    path = "/playlists/{playlist_id}/collaborations",
    tag = "Collaboration",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    responses(
        (status = 200, description = "Current grants.", body = Vec<Collaboration>),
        (status = 403, description = "User is not the playlist owner."),
        (status = 404, description = "Playlist not found."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn list_collaborators_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
) -> Result<Json<Vec<Collaboration>>, PlaylistError> {
    let collaborations = list_collaborators(&context.pool, &playlist_id, &user.user_id).await?;
    Ok(Json(collaborations))
}
