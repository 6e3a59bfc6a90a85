use crate::api_state::ApiContext;
use crate::routes::collaboration::handlers::{
    add_collaborator_handler, list_collaborators_handler, remove_collaborator_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn collaboration_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/collaborations",
            post(add_collaborator_handler).delete(remove_collaborator_handler),
        )
        .route(
            "/playlists/{playlist_id}/collaborations",
            get(list_collaborators_handler),
        )
}
