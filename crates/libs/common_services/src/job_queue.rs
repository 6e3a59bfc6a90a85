//! Durable named queues stored in PostgreSQL.
//!
//! A message is published by committing a `queue_message` row, so it survives a
//! database restart. Consumers claim, acknowledge and reject messages from the worker.

use bon::builder;
use common_types::ExportPlaylistPayload;
use sqlx::{Executor, PgPool, Postgres};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue connection failed: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Could not encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Queue {0} has not been declared")]
    UnknownQueue(String),
}

/// Declares a durable queue. Declaring an existing queue is a no-op.
///
/// Returns `true` if this call created the queue.
#[instrument(skip(executor))]
pub async fn declare_queue(
    executor: impl Executor<'_, Database = Postgres>,
    name: &str,
) -> Result<bool, QueueError> {
    let result = sqlx::query(
        r"
        INSERT INTO message_queue (name, durable)
        VALUES ($1, TRUE)
        ON CONFLICT (name) DO NOTHING
        ",
    )
    .bind(name)
    .execute(executor)
    .await?;

    let created = result.rows_affected() > 0;
    if created {
        info!("Declared durable queue {}", name);
    }
    Ok(created)
}

/// Publishes a raw message body on a declared queue and returns its id.
#[instrument(skip(executor, body), fields(bytes = body.len()))]
pub async fn publish(
    executor: impl Executor<'_, Database = Postgres>,
    queue: &str,
    body: &[u8],
) -> Result<i64, QueueError> {
    let id = sqlx::query_scalar::<_, i64>(
        r"
        INSERT INTO queue_message (queue, body)
        SELECT name, $2 FROM message_queue WHERE name = $1
        RETURNING id
        ",
    )
    .bind(queue)
    .bind(body)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| QueueError::UnknownQueue(queue.to_owned()))?;

    debug!("Published message {} on {}", id, queue);
    Ok(id)
}

/// Enqueues a playlist export job.
///
/// Returns once the message is committed; delivery happens in the worker.
#[builder]
pub async fn enqueue_export_job(
    #[builder(start_fn)] pool: &PgPool,
    #[builder(start_fn)] queue: &str,
    #[builder(into)] playlist_id: String,
    #[builder(into)] target_email: String,
) -> Result<i64, QueueError> {
    let payload = ExportPlaylistPayload {
        playlist_id,
        target_email,
    };
    let body = payload.to_body()?;

    let mut tx = pool.begin().await?;
    declare_queue(&mut *tx, queue).await?;
    let id = publish(&mut *tx, queue, &body).await?;
    tx.commit().await?;

    info!(
        "Enqueued export of playlist {} as message {}",
        payload.playlist_id, id
    );
    Ok(id)
}
