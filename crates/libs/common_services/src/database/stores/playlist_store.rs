use crate::database::DbError;
use crate::database::playlist::{Playlist, PlaylistAccess, PlaylistSummary, RowLock};
use crate::database::song::SongSummary;
use sqlx::postgres::PgQueryResult;
use sqlx::{Executor, Postgres};

pub struct PlaylistStore;

impl PlaylistStore {
    //================================================================================
    // Core Playlist Management
    //================================================================================

    /// Creates a new playlist owned by `owner_id`.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
        name: &str,
        owner_id: &str,
    ) -> Result<Playlist, DbError> {
        Ok(sqlx::query_as::<_, Playlist>(
            r"
            INSERT INTO playlists (id, name, owner)
            VALUES ($1, $2, $3)
            RETURNING id, name, owner
            ",
        )
        .bind(playlist_id)
        .bind(name)
        .bind(owner_id)
        .fetch_one(executor)
        .await?)
    }

    /// Retrieves a single playlist by its ID.
    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
    ) -> Result<Option<Playlist>, DbError> {
        Ok(
            sqlx::query_as::<_, Playlist>("SELECT id, name, owner FROM playlists WHERE id = $1")
                .bind(playlist_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Retrieves all playlists a user owns or collaborates on.
    pub async fn list_for_member(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: &str,
    ) -> Result<Vec<PlaylistSummary>, DbError> {
        Ok(sqlx::query_as::<_, PlaylistSummary>(
            r"
            SELECT DISTINCT p.id, p.name, u.username
            FROM playlists p
            JOIN users u ON p.owner = u.id
            LEFT JOIN collaborations c ON p.id = c.playlist_id
            WHERE p.owner = $1 OR c.user_id = $1
            ORDER BY p.name, p.id
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }

    /// Retrieves a playlist together with its owner's username.
    pub async fn find_summary(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
    ) -> Result<Option<PlaylistSummary>, DbError> {
        Ok(sqlx::query_as::<_, PlaylistSummary>(
            r"
            SELECT p.id, p.name, u.username
            FROM playlists p
            JOIN users u ON p.owner = u.id
            WHERE p.id = $1
            ",
        )
        .bind(playlist_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes a playlist. Grants, song entries and activities cascade.
    pub async fn delete(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(playlist_id)
            .execute(executor)
            .await?)
    }

    //================================================================================
    // Access Facts
    //================================================================================

    /// Loads ownership and collaboration membership for `subject_id` in one query.
    ///
    /// Returns `None` when the playlist does not exist. `lock` only has effect inside a
    /// transaction.
    pub async fn find_access(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
        subject_id: &str,
        lock: RowLock,
    ) -> Result<Option<PlaylistAccess>, DbError> {
        let sql = format!(
            r"
            SELECT
                p.id,
                p.name,
                p.owner AS owner_id,
                EXISTS (
                    SELECT 1 FROM collaborations c
                    WHERE c.playlist_id = p.id AND c.user_id = $2
                ) AS is_collaborator
            FROM playlists p
            WHERE p.id = $1
            {}
            ",
            lock.as_sql()
        );
        Ok(sqlx::query_as::<_, PlaylistAccess>(&sql)
            .bind(playlist_id)
            .bind(subject_id)
            .fetch_optional(executor)
            .await?)
    }

    //================================================================================
    // Playlist Song Management
    //================================================================================

    /// Adds a song entry. The same song may be added more than once.
    pub async fn add_song(
        executor: impl Executor<'_, Database = Postgres>,
        entry_id: &str,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(sqlx::query(
            "INSERT INTO playlist_songs (id, playlist_id, song_id) VALUES ($1, $2, $3)",
        )
        .bind(entry_id)
        .bind(playlist_id)
        .bind(song_id)
        .execute(executor)
        .await?)
    }

    /// Removes every entry of `song_id` from the playlist.
    pub async fn remove_song(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<PgQueryResult, DbError> {
        Ok(
            sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = $1 AND song_id = $2")
                .bind(playlist_id)
                .bind(song_id)
                .execute(executor)
                .await?,
        )
    }

    /// Lists the songs currently linked to a playlist.
    pub async fn list_songs(
        executor: impl Executor<'_, Database = Postgres>,
        playlist_id: &str,
    ) -> Result<Vec<SongSummary>, DbError> {
        Ok(sqlx::query_as::<_, SongSummary>(
            r"
            SELECT s.id, s.title, s.performer
            FROM songs s
            INNER JOIN playlist_songs ps ON s.id = ps.song_id
            WHERE ps.playlist_id = $1
            ",
        )
        .bind(playlist_id)
        .fetch_all(executor)
        .await?)
    }
}
