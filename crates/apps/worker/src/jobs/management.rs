use color_eyre::Result;
use common_services::alert;
use common_services::database::queue_message::{MessageStatus, QueueMessage};
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};

/// Atomically claims up to `limit` messages from `queue` for `worker_id`.
///
/// Ready messages are claimed first-in first-out. A delivered message whose heartbeat is
/// older than `redelivery_timeout` belongs to a worker presumed dead and is claimed again.
pub async fn claim_messages(
    pool: &PgPool,
    queue: &str,
    worker_id: &str,
    limit: usize,
    redelivery_timeout: Duration,
) -> Result<Vec<QueueMessage>> {
    let mut tx = pool.begin().await?;

    let mut messages = sqlx::query_as::<_, QueueMessage>(
        r"
        WITH candidate AS (
            SELECT id FROM queue_message
            WHERE queue = $1
              AND (status = $5
               OR (status = $6 AND last_heartbeat < now() - interval '1 second' * $4))
            ORDER BY id
            FOR UPDATE SKIP LOCKED
            LIMIT $3
        )
        UPDATE queue_message
        SET status = $6,
            owner = $2,
            delivered_at = now(),
            last_heartbeat = now(),
            delivery_count = delivery_count + 1
        WHERE id IN (SELECT id FROM candidate)
        RETURNING id, queue, body, delivery_count
        ",
    )
    .bind(queue)
    .bind(worker_id)
    .bind(i64::try_from(limit).unwrap_or(i64::MAX))
    .bind(redelivery_timeout.as_secs_f64())
    .bind(MessageStatus::Ready.as_str())
    .bind(MessageStatus::Delivered.as_str())
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    messages.sort_by_key(|message| message.id);

    for message in messages.iter().filter(|m| m.delivery_count > 1) {
        warn!(
            "🔁 Redelivering message {} (delivery {})",
            message.id, message.delivery_count
        );
    }
    Ok(messages)
}

/// Acknowledges a message, removing it from the queue for good.
///
/// Returns `false` if the worker no longer owned the message.
pub async fn ack_message(pool: &PgPool, message: &QueueMessage, worker_id: &str) -> Result<bool> {
    let result =
        sqlx::query("DELETE FROM queue_message WHERE id = $1 AND owner = $2 AND status = $3")
            .bind(message.id)
            .bind(worker_id)
            .bind(MessageStatus::Delivered.as_str())
            .execute(pool)
            .await?;

    let acked = result.rows_affected() > 0;
    if acked {
        info!("✅ Acknowledged message {}", message.id);
    } else {
        warn!(
            "Message {} was reclaimed by another worker before it could be acknowledged.",
            message.id
        );
    }
    Ok(acked)
}

/// Rejects a message without requeueing it.
///
/// The row is kept with status `rejected` and the reason, as a dead letter.
pub async fn reject_message(
    pool: &PgPool,
    message: &QueueMessage,
    worker_id: &str,
    reason: &str,
) -> Result<bool> {
    alert!(
        "‼️ Rejecting message {} on {}: {}",
        message.id,
        message.queue,
        reason
    );
    let result = sqlx::query(
        r"
        UPDATE queue_message
        SET status = $4, last_error = $3, finished_at = now(), owner = NULL
        WHERE id = $1 AND owner = $2 AND status = $5
        ",
    )
    .bind(message.id)
    .bind(worker_id)
    .bind(reason)
    .bind(MessageStatus::Rejected.as_str())
    .bind(MessageStatus::Delivered.as_str())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
