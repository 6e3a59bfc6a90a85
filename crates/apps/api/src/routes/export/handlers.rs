use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::export::error::ExportError;
use common_services::api::export::interfaces::{ExportPlaylistRequest, ExportRequestAccepted};
use common_services::api::export::service::export_playlist;
use tracing::{info, instrument};
use validator::Validate;

/// Request an export of a playlist by email.
///
/// Only the playlist owner may export. The request returns as soon as the job is
/// queued; the mail is sent by the export worker.
#[utoipa::path(
    post,
    path = "/export/playlists/{playlist_id}",
    tag = "Export",
    params(
        ("playlist_id" = String, Path, description = "The unique ID of the playlist.")
    ),
    request_body = ExportPlaylistRequest,
    responses(
        (status = 201, description = "Export queued.", body = ExportRequestAccepted),
        (status = 400, description = "Invalid target email."),
        (status = 401, description = "Missing or invalid token."),
        (status = 403, description = "User is not the playlist owner."),
        (status = 404, description = "Playlist not found."),
        (status = 503, description = "The export queue is unavailable."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn export_playlist_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(playlist_id): Path<String>,
    payload: Result<Json<ExportPlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ExportRequestAccepted>), ExportError> {
    let Json(payload) = payload?;
    payload.validate()?;
    let message_id = export_playlist(
        &context.pool,
        &context.settings.queue,
        &playlist_id,
        &user.user_id,
        &payload.target_email,
    )
    .await?;
    info!("Export of {} queued as message {}", playlist_id, message_id);
    Ok((StatusCode::CREATED, Json(ExportRequestAccepted::default())))
}
