//! Playlist authorization.
//!
//! Every operation that reads or changes a playlist on behalf of a user goes through
//! [`require_role`]. Facts are loaded fresh on each call and never cached.

use crate::api::access::error::AccessError;
use crate::database::DbError;
use crate::database::playlist::{PlaylistAccess, RowLock};
use crate::database::playlist_store::PlaylistStore;
use sqlx::{Executor, Postgres};
use std::fmt;
use std::fmt::Display;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistRole {
    /// Deleting the playlist, granting and revoking collaborators, exporting.
    Owner,
    /// Adding and removing songs, viewing songs and activities.
    OwnerOrCollaborator,
}

impl PlaylistRole {
    /// Owner-level operations wait for in-flight collaborator mutations.
    #[must_use]
    pub const fn row_lock(self) -> RowLock {
        match self {
            Self::Owner => RowLock::Update,
            Self::OwnerOrCollaborator => RowLock::Share,
        }
    }
}

impl Display for PlaylistRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => f.write_str("OWNER"),
            Self::OwnerOrCollaborator => f.write_str("OWNER_OR_COLLABORATOR"),
        }
    }
}

/// Pure decision over already loaded facts.
#[must_use]
pub fn is_permitted(access: &PlaylistAccess, subject_id: &str, role: PlaylistRole) -> bool {
    let is_owner = access.owner_id == subject_id;
    match role {
        PlaylistRole::Owner => is_owner,
        PlaylistRole::OwnerOrCollaborator => is_owner || access.is_collaborator,
    }
}

/// Turns loaded facts into a decision. A missing playlist wins over a missing role.
pub fn authorize(
    access: Option<PlaylistAccess>,
    playlist_id: &str,
    subject_id: &str,
    role: PlaylistRole,
) -> Result<PlaylistAccess, AccessError> {
    let Some(access) = access else {
        return Err(AccessError::NotFound(playlist_id.to_owned()));
    };
    if !is_permitted(&access, subject_id, role) {
        return Err(AccessError::Forbidden {
            playlist_id: playlist_id.to_owned(),
            subject_id: subject_id.to_owned(),
            role,
        });
    }
    Ok(access)
}

/// Loads the access facts for `subject_id` and requires `role`.
///
/// Run this on the same transaction as the mutation it guards: the playlist row stays
/// locked (see [`PlaylistRole::row_lock`]) until that transaction ends.
#[instrument(skip(executor))]
pub async fn require_role(
    executor: impl Executor<'_, Database = Postgres>,
    playlist_id: &str,
    subject_id: &str,
    role: PlaylistRole,
) -> Result<PlaylistAccess, AccessError> {
    let access =
        PlaylistStore::find_access(executor, playlist_id, subject_id, role.row_lock()).await?;
    let decision = authorize(access, playlist_id, subject_id, role);
    debug!(allowed = decision.is_ok(), "Playlist access decision");
    decision
}

/// Boolean form of [`require_role`] without locking.
pub async fn can_mutate(
    executor: impl Executor<'_, Database = Postgres>,
    playlist_id: &str,
    subject_id: &str,
    role: PlaylistRole,
) -> Result<bool, DbError> {
    let access =
        PlaylistStore::find_access(executor, playlist_id, subject_id, RowLock::None).await?;
    Ok(access.is_some_and(|access| is_permitted(&access, subject_id, role)))
}
