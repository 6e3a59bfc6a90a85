use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(sqlx::Error),

    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let is_unique_violation =
            matches!(&err, sqlx::Error::Database(db_err) if db_err.is_unique_violation());
        if is_unique_violation {
            Self::UniqueViolation(err)
        } else {
            Self::Sqlx(err)
        }
    }
}
