use crate::database::DbError;
use crate::database::app_user::User;
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    /// Retrieves a user by ID.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: &str,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, username, fullname FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }
}
