use crate::api_state::ApiContext;
use crate::routes::album::handlers::{
    get_album_likes_handler, like_album_handler, unlike_album_handler,
};
use axum::{Router, routing::get, routing::post};

pub fn album_public_router() -> Router<ApiContext> {
    Router::new().route("/albums/{album_id}/likes", get(get_album_likes_handler))
}

pub fn album_protected_router() -> Router<ApiContext> {
    Router::new().route(
        "/albums/{album_id}/likes",
        post(like_album_handler).delete(unlike_album_handler),
    )
}
