use crate::database::DbError;
use sqlx::{Executor, Postgres};

pub struct SongStore;

impl SongStore {
    pub async fn exists(
        executor: impl Executor<'_, Database = Postgres>,
        song_id: &str,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM songs WHERE id = $1)")
                .bind(song_id)
                .fetch_one(executor)
                .await?,
        )
    }
}
