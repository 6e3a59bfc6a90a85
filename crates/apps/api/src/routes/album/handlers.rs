use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use common_services::api::album::error::AlbumError;
use common_services::api::album::interfaces::{AlbumLikesResponse, LikeSource};
use common_services::api::album::service::{get_album_likes, like_album, unlike_album};
use common_services::api::playlist::interfaces::MessageResponse;
use tracing::instrument;

pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// Like an album.
#[utoipa::path(
    post,
    path = "/albums/{album_id}/likes",
    tag = "Album",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    responses(
        (status = 201, description = "Album liked.", body = MessageResponse),
        (status = 404, description = "Album not found."),
        (status = 409, description = "Album already liked by this user."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn like_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(album_id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), AlbumError> {
    like_album(&context.pool, &context.like_cache, &album_id, &user.user_id).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Album liked"))))
}

/// Remove a like from an album.
#[utoipa::path(
    delete,
    path = "/albums/{album_id}/likes",
    tag = "Album",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    responses(
        (status = 200, description = "Like removed.", body = MessageResponse),
        (status = 404, description = "The user had not liked this album."),
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(context))]
pub async fn unlike_album_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(album_id): Path<String>,
) -> Result<Json<MessageResponse>, AlbumError> {
    unlike_album(&context.pool, &context.like_cache, &album_id, &user.user_id).await?;
    Ok(Json(MessageResponse::new("Album like removed")))
}

/// Get the number of likes of an album.
///
/// Counts served from cache carry an `X-Data-Source: cache` header.
#[utoipa::path(
    get,
    path = "/albums/{album_id}/likes",
    tag = "Album",
    params(
        ("album_id" = String, Path, description = "The unique ID of the album.")
    ),
    responses(
        (status = 200, description = "The like count.", body = AlbumLikesResponse,
            headers(("X-Data-Source" = String, description = "`cache` when served from cache"))),
    )
)]
#[instrument(skip(context))]
pub async fn get_album_likes_handler(
    State(context): State<ApiContext>,
    Path(album_id): Path<String>,
) -> Result<Response, AlbumError> {
    let (likes, source) = get_album_likes(&context.pool, &context.like_cache, &album_id).await?;

    let mut response = Json(AlbumLikesResponse { likes }).into_response();
    if source == LikeSource::Cache {
        response.headers_mut().insert(
            DATA_SOURCE_HEADER,
            HeaderValue::from_static(source.as_header_value()),
        );
    }
    Ok(response)
}
