use super::interfaces::PlaylistDetails;
use crate::api::access::guard::{PlaylistRole, require_role};
use crate::api::playlist::error::PlaylistError;
use crate::database::activity::{ActivityAction, PlaylistActivity};
use crate::database::activity_store::ActivityStore;
use crate::database::playlist::{Playlist, PlaylistSummary};
use crate::database::playlist_store::PlaylistStore;
use crate::database::song_store::SongStore;
use crate::utils::prefixed_id;
use sqlx::PgPool;
use tracing::{info, instrument};

/// Creates a playlist owned by `owner_id`.
#[instrument(skip(pool))]
pub async fn create_playlist(
    pool: &PgPool,
    owner_id: &str,
    name: &str,
) -> Result<Playlist, PlaylistError> {
    let playlist_id = prefixed_id("playlist");
    let playlist = PlaylistStore::create(pool, &playlist_id, name, owner_id).await?;
    info!("Created playlist {} for {}", playlist.id, owner_id);
    Ok(playlist)
}

/// Lists the playlists `user_id` owns or collaborates on.
#[instrument(skip(pool))]
pub async fn list_playlists(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<PlaylistSummary>, PlaylistError> {
    Ok(PlaylistStore::list_for_member(pool, user_id).await?)
}

/// Fetches a playlist with its songs. Requires owner or collaborator access.
#[instrument(skip(pool))]
pub async fn get_playlist_songs(
    pool: &PgPool,
    playlist_id: &str,
    user_id: &str,
) -> Result<PlaylistDetails, PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, user_id, PlaylistRole::OwnerOrCollaborator).await?;

    let summary = PlaylistStore::find_summary(&mut *tx, playlist_id)
        .await?
        .ok_or_else(|| PlaylistError::NotFound(format!("playlist {playlist_id}")))?;
    let songs = PlaylistStore::list_songs(&mut *tx, playlist_id).await?;
    tx.commit().await?;

    Ok(PlaylistDetails {
        id: summary.id,
        name: summary.name,
        username: summary.username,
        songs,
    })
}

/// Adds a song and records an `add` activity in the same transaction.
#[instrument(skip(pool))]
pub async fn add_song_to_playlist(
    pool: &PgPool,
    playlist_id: &str,
    song_id: &str,
    user_id: &str,
) -> Result<(), PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, user_id, PlaylistRole::OwnerOrCollaborator).await?;

    if !SongStore::exists(&mut *tx, song_id).await? {
        return Err(PlaylistError::NotFound(format!("song {song_id}")));
    }

    PlaylistStore::add_song(&mut *tx, &prefixed_id("playlist-song"), playlist_id, song_id)
        .await?;
    ActivityStore::append(
        &mut *tx,
        &prefixed_id("playlist-activity"),
        playlist_id,
        song_id,
        user_id,
        ActivityAction::Add,
    )
    .await?;

    tx.commit().await?;
    info!("Added song {} to playlist {}", song_id, playlist_id);
    Ok(())
}

/// Removes every entry of a song and records a `delete` activity.
///
/// Nothing is recorded when the song was not in the playlist.
#[instrument(skip(pool))]
pub async fn remove_song_from_playlist(
    pool: &PgPool,
    playlist_id: &str,
    song_id: &str,
    user_id: &str,
) -> Result<(), PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, user_id, PlaylistRole::OwnerOrCollaborator).await?;

    let removed = PlaylistStore::remove_song(&mut *tx, playlist_id, song_id).await?;
    if removed.rows_affected() == 0 {
        return Err(PlaylistError::NotFound(format!(
            "song {song_id} is not in playlist {playlist_id}"
        )));
    }

    ActivityStore::append(
        &mut *tx,
        &prefixed_id("playlist-activity"),
        playlist_id,
        song_id,
        user_id,
        ActivityAction::Delete,
    )
    .await?;

    tx.commit().await?;
    info!("Removed song {} from playlist {}", song_id, playlist_id);
    Ok(())
}

/// Deletes a playlist. Only its owner may do this.
#[instrument(skip(pool))]
pub async fn delete_playlist(
    pool: &PgPool,
    playlist_id: &str,
    user_id: &str,
) -> Result<(), PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, user_id, PlaylistRole::Owner).await?;
    PlaylistStore::delete(&mut *tx, playlist_id).await?;
    tx.commit().await?;
    info!("Deleted playlist {}", playlist_id);
    Ok(())
}

/// Lists song add/remove activities, oldest first.
#[instrument(skip(pool))]
pub async fn list_activities(
    pool: &PgPool,
    playlist_id: &str,
    user_id: &str,
) -> Result<Vec<PlaylistActivity>, PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, user_id, PlaylistRole::OwnerOrCollaborator).await?;
    let activities = ActivityStore::list_for_playlist(&mut *tx, playlist_id).await?;
    tx.commit().await?;
    Ok(activities)
}
