use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(100);

/// Keeps the worker's claimed messages alive until the returned handle is aborted.
///
/// Messages whose heartbeat stops are handed to another worker after the redelivery timeout.
/// A failed update is retried on the next beat; the loop only ends once the worker holds
/// no delivered messages.
pub fn start_heartbeat_loop(pool: &PgPool, worker_id: &str, every: Duration) -> JoinHandle<()> {
    let pool_clone = pool.clone();
    let worker_id = worker_id.to_owned();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(MIN_HEARTBEAT_INTERVAL));
        loop {
            interval.tick().await;
            let result = sqlx::query(
                "UPDATE queue_message SET last_heartbeat = now() \
                 WHERE owner = $1 AND status = 'delivered'",
            )
            .bind(&worker_id)
            .execute(&pool_clone)
            .await;

            match result {
                Ok(res) if res.rows_affected() == 0 => break,
                Ok(_) => {}
                Err(e) => warn!("[Worker ID: {}] Heartbeat failed, retrying: {}", worker_id, e),
            }
        }
    })
}
