use crate::api::access::guard::{PlaylistRole, require_role};
use crate::api::playlist::error::PlaylistError;
use crate::database::DbError;
use crate::database::collaboration::Collaboration;
use crate::database::collaboration_store::CollaborationStore;
use crate::database::user_store::UserStore;
use crate::utils::prefixed_id;
use sqlx::{Executor, PgPool, Postgres};
use tracing::{info, instrument};

async fn ensure_user_exists(
    executor: impl Executor<'_, Database = Postgres>,
    user_id: &str,
) -> Result<(), PlaylistError> {
    UserStore::find_by_id(executor, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| PlaylistError::NotFound(format!("user {user_id}")))
}

/// Grants `collaborator_id` collaboration on a playlist owned by `owner_id`.
#[instrument(skip(pool))]
pub async fn add_collaborator(
    pool: &PgPool,
    playlist_id: &str,
    collaborator_id: &str,
    owner_id: &str,
) -> Result<Collaboration, PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, owner_id, PlaylistRole::Owner).await?;
    ensure_user_exists(&mut *tx, collaborator_id).await?;

    let collaboration = CollaborationStore::create(
        &mut *tx,
        &prefixed_id("collab"),
        playlist_id,
        collaborator_id,
    )
    .await
    .map_err(|err| match err {
        DbError::UniqueViolation(_) => PlaylistError::Conflict(format!(
            "user {collaborator_id} already collaborates on playlist {playlist_id}"
        )),
        other => other.into(),
    })?;

    tx.commit().await?;
    info!(
        "Granted {} collaboration on playlist {}",
        collaborator_id, playlist_id
    );
    Ok(collaboration)
}

/// Revokes a collaboration grant. Fails with `NotFound` if there was none.
#[instrument(skip(pool))]
pub async fn remove_collaborator(
    pool: &PgPool,
    playlist_id: &str,
    collaborator_id: &str,
    owner_id: &str,
) -> Result<(), PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, owner_id, PlaylistRole::Owner).await?;
    ensure_user_exists(&mut *tx, collaborator_id).await?;

    let removed = CollaborationStore::delete(&mut *tx, playlist_id, collaborator_id).await?;
    if removed.rows_affected() == 0 {
        return Err(PlaylistError::NotFound(format!(
            "collaboration of user {collaborator_id} on playlist {playlist_id}"
        )));
    }

    tx.commit().await?;
    info!(
        "Revoked {} collaboration on playlist {}",
        collaborator_id, playlist_id
    );
    Ok(())
}

/// Lists the grants on a playlist. Only its owner may see them.
#[instrument(skip(pool))]
pub async fn list_collaborators(
    pool: &PgPool,
    playlist_id: &str,
    owner_id: &str,
) -> Result<Vec<Collaboration>, PlaylistError> {
    let mut tx = pool.begin().await?;
    require_role(&mut *tx, playlist_id, owner_id, PlaylistRole::Owner).await?;
    let collaborations = CollaborationStore::list_for_playlist(&mut *tx, playlist_id).await?;
    tx.commit().await?;
    Ok(collaborations)
}
