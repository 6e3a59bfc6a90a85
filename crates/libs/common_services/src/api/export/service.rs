use crate::api::access::guard::{PlaylistRole, require_role};
use crate::api::export::error::ExportError;
use crate::job_queue::enqueue_export_job;
use app_state::QueueSettings;
use sqlx::PgPool;
use tracing::instrument;

/// Queues an export of a playlist to `target_email`. Only the owner may export.
///
/// `target_email` must already have passed format validation.
#[instrument(skip(pool, queue))]
pub async fn export_playlist(
    pool: &PgPool,
    queue: &QueueSettings,
    playlist_id: &str,
    user_id: &str,
    target_email: &str,
) -> Result<i64, ExportError> {
    require_role(pool, playlist_id, user_id, PlaylistRole::Owner).await?;

    let message_id = enqueue_export_job(pool, &queue.export_queue)
        .playlist_id(playlist_id)
        .target_email(target_email)
        .call()
        .await?;
    Ok(message_id)
}
