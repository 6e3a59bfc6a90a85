use crate::api::access::error::AccessError;
use crate::database::DbError;
use crate::job_queue::QueueError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Export queue unavailable: {0}")]
    QueueUnavailable(String),
}

fn log_error(error: &ExportError) {
    match error {
        ExportError::Database(e) => warn!("Database query failed: {}", e),
        ExportError::Internal(e) => warn!("Internal error: {:?}", e),
        ExportError::NotFound(message) => warn!("Export -> Not found: {}", message),
        ExportError::Forbidden(message) => warn!("Export -> Forbidden: {}", message),
        ExportError::Validation(errors) => info!("Export -> Invalid request: {}", errors),
        ExportError::InvalidBody(rejection) => {
            info!("Export -> Invalid request body: {}", rejection.body_text());
        }
        ExportError::QueueUnavailable(message) => {
            error!("Export -> Could not enqueue job: {}", message);
        }
    }
}

impl IntoResponse for ExportError {
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
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, format!("Invalid request: {errors}"))
            }
            Self::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            ),
            Self::QueueUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The export queue is unavailable, try again later.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<QueueError> for ExportError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Connection(e) => Self::QueueUnavailable(e.to_string()),
            QueueError::UnknownQueue(name) => Self::QueueUnavailable(format!("queue {name}")),
            QueueError::Encode(e) => Self::Internal(eyre::Report::new(e)),
        }
    }
}

impl From<DbError> for ExportError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<AccessError> for ExportError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(id) => Self::NotFound(format!("playlist {id}")),
            forbidden @ AccessError::Forbidden { .. } => Self::Forbidden(forbidden.to_string()),
            AccessError::Database(db_err) => db_err.into(),
        }
    }
}
