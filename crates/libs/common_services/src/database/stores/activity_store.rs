use crate::database::DbError;
use crate::database::activity::{ActivityAction, ActivityRecord, PlaylistActivity};
use sqlx::{Executor, Postgres};

pub struct ActivityStore;

impl ActivityStore {
    /// Appends an activity record. `time` is assigned by the database clock.
    pub async fn append(
        executor: impl Executor<'_, Database = Postgres>,
        activity_id: &str,
        playlist_id: &str,
        song_id: &str,
        user_id: &str,
        action: ActivityAction,
    ) -> Result<ActivityRecord, DbError> {
        Ok(sqlx::query_as::<_, ActivityRecord>(
            r"
            INSERT INTO playlist_activities (id, playlist_id, song_id, user_id, action)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, playlist_id, song_id, user_id, action, time
            ",
        )
        .bind(activity_id)
        .bind(playlist_id)
        .bind(song_id)
        .bind(user_id)
        .bind(action.as_str())
        .fetch_one(executor)
        .await?)
    }

    /// Lists a playlist's activities, oldest first, with the current username and song title.
    pub async fn list_for_playlist(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistActivity>, DbError> {
        Ok(sqlx::query_as::<_, PlaylistActivity>(
            r"
            SELECT u.username, s.title, pa.action, pa.time
            FROM playlist_activities pa
            JOIN users u ON pa.user_id = u.id
            JOIN songs s ON pa.song_id = s.id
            WHERE pa.playlist_id = $1
            ORDER BY pa.time ASC
            ",
        )
        .bind(playlist_id)
        .fetch_all(executor)
        .await?)
    }
}
