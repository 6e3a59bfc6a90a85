use crate::api::access::error::AccessError;
use crate::database::DbError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

fn log_error(error: &PlaylistError) {
    match error {
        PlaylistError::Database(e) => warn!("Database query failed: {}", e),
        PlaylistError::Internal(e) => warn!("Internal error: {:?}", e),
        PlaylistError::NotFound(message) => warn!("Playlist -> Not found: {}", message),
        PlaylistError::Forbidden(message) => warn!("Playlist -> Forbidden: {}", message),
        PlaylistError::Conflict(message) => info!("Playlist -> Conflict: {}", message),
        PlaylistError::Validation(errors) => info!("Playlist -> Invalid request: {}", errors),
        PlaylistError::InvalidBody(rejection) => {
            info!("Playlist -> Invalid request body: {}", rejection.body_text());
        }
    }
}

impl IntoResponse for PlaylistError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, format!("Forbidden: {message}")),
            Self::Conflict(message) => (StatusCode::CONFLICT, message),
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request: {errors}"))
            }
            Self::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for PlaylistError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::Conflict("record already exists".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<AccessError> for PlaylistError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(id) => Self::NotFound(format!("playlist {id}")),
            forbidden @ AccessError::Forbidden { .. } => Self::Forbidden(forbidden.to_string()),
            AccessError::Database(db_err) => db_err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::access::guard::PlaylistRole;

    #[test]
    fn access_errors_map_to_status_codes() {
        let not_found: PlaylistError = AccessError::NotFound("playlist-1".into()).into();
        let forbidden: PlaylistError = AccessError::Forbidden {
            playlist_id: "playlist-1".into(),
            subject_id: "user-bob".into(),
            role: PlaylistRole::OwnerOrCollaborator,
        }
        .into();

        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_and_validation_statuses() {
        assert_eq!(
            PlaylistError::Conflict("duplicate".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PlaylistError::Validation(ValidationErrors::new())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_errors_are_internal() {
        let err: PlaylistError = DbError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
