use crate::database::DbError;
use crate::database::collaboration::Collaboration;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct CollaborationStore;

impl CollaborationStore {
    /// Grants `user_id` collaboration on a playlist.
    ///
    /// A second grant for the same pair fails with [`DbError::UniqueViolation`].
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        collaboration_id: &str,
        playlist_id: &str,
        user_id: &str,
    ) -> Result<Collaboration, DbError> {
        Ok(sqlx::query_as::<_, Collaboration>(
            r"
            INSERT INTO collaborations (id, playlist_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, playlist_id, user_id
            ",
        )
        .bind(collaboration_id)
        .bind(playlist_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }

    /// Revokes every grant for the pair.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
        user_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM collaborations WHERE playlist_id = $1 AND user_id = $2")
                .bind(playlist_id)
                .bind(user_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn list_for_playlist(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
    ) -> Result<Vec<Collaboration>, DbError> {
        Ok(sqlx::query_as::<_, Collaboration>(
            r"
            SELECT id, playlist_id, user_id
            FROM collaborations
            WHERE playlist_id = $1
            ORDER BY id
            ",
        )
        .bind(playlist_id)
        .fetch_all(executor)
        .await?)
    }
}
