use crate::database::DbError;
use crate::database::album::AlbumLike;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct AlbumStore;

impl AlbumStore {
    pub async fn exists(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM albums WHERE id = $1)")
                .bind(album_id)
                .fetch_one(executor)
                .await?,
        )
    }

    //================================================================================
    // Album Likes
    //================================================================================

    /// Records a like. Liking the same album twice fails with [`DbError::UniqueViolation`].
    pub async fn add_like(
        executor: impl Executor<'_, Database = Postgres>,
        like_id: &str,
        album_id: &str,
        user_id: &str,
    ) -> Result<AlbumLike, DbError> {
        Ok(sqlx::query_as::<_, AlbumLike>(
            r"
            INSERT INTO album_likes (id, album_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, album_id, user_id
            ",
        )
        .bind(like_id)
        .bind(album_id)
        .bind(user_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn remove_like(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
        user_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM album_likes WHERE album_id = $1 AND user_id = $2")
                .bind(album_id)
                .bind(user_id)
                .execute(executor)
                .await?,
        )
    }

    pub async fn count_likes(
        executor: impl Executor<'_, Database = Postgres>,
        album_id: &str,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM album_likes WHERE album_id = $1")
                .bind(album_id)
                .fetch_one(executor)
                .await?,
        )
    }
}
