use super::interfaces::LikeSource;
use crate::api::album::error::AlbumError;
use crate::cache::LikeCountCache;
use crate::database::album_store::AlbumStore;
use crate::utils::prefixed_id;
use sqlx::PgPool;
use tracing::{debug, instrument};

#[instrument(skip(pool, cache))]
pub async fn like_album(
    pool: &PgPool,
    cache: &LikeCountCache,
    album_id: &str,
    user_id: &str,
) -> Result<(), AlbumError> {
    if !AlbumStore::exists(pool, album_id).await? {
        return Err(AlbumError::NotFound(format!("album {album_id}")));
    }
    AlbumStore::add_like(pool, &prefixed_id("album-like"), album_id, user_id).await?;
    cache.invalidate(album_id).await;
    Ok(())
}

#[instrument(skip(pool, cache))]
pub async fn unlike_album(
    pool: &PgPool,
    cache: &LikeCountCache,
    album_id: &str,
    user_id: &str,
) -> Result<(), AlbumError> {
    let removed = AlbumStore::remove_like(pool, album_id, user_id).await?;
    if removed.rows_affected() == 0 {
        return Err(AlbumError::NotFound(format!(
            "like of user {user_id} on album {album_id}"
        )));
    }
    cache.invalidate(album_id).await;
    Ok(())
}

/// Returns the like count and where it came from. Misses are filled from a fresh count.
#[instrument(skip(pool, cache))]
pub async fn get_album_likes(
    pool: &PgPool,
    cache: &LikeCountCache,
    album_id: &str,
) -> Result<(i64, LikeSource), AlbumError> {
    if let Some(likes) = cache.get(album_id).await {
        debug!("Serving likes of {} from cache", album_id);
        return Ok((likes, LikeSource::Cache));
    }

    let likes = AlbumStore::count_likes(pool, album_id).await?;
    cache.insert(album_id, likes).await;
    Ok((likes, LikeSource::Database))
}
