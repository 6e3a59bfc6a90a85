use crate::context::WorkerContext;
use crate::handlers::{Disposition, handle_message};
use crate::jobs::heartbeat::start_heartbeat_loop;
use crate::jobs::management::{ack_message, claim_messages, reject_message};
use crate::mailer::MailTransport;
use app_state::AppSettings;
use color_eyre::Result;
use common_services::database::queue_message::QueueMessage;
use common_services::job_queue::declare_queue;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{error, info, warn};

const WORKER_RESTART_BACKOFF: Duration = Duration::from_secs(5);

/// Starts `consumer.workers` workers on the export queue and runs until the process
/// receives Ctrl-C. A worker that stops is replaced after a short backoff.
pub async fn run_consumer(
    pool: PgPool,
    settings: AppSettings,
    mailer: Arc<dyn MailTransport>,
) -> Result<()> {
    declare_queue(&pool, &settings.queue.export_queue).await?;
    info!(
        "Consuming {} with {} workers, prefetch {}",
        settings.queue.export_queue, settings.consumer.workers, settings.consumer.prefetch
    );

    let workers = settings.consumer.workers;
    let spawn_worker = || {
        let context = WorkerContext::new(pool.clone(), settings.clone(), mailer.clone());
        async move { run_worker_loop(&context, false).await }
    };
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for Ctrl-C: {}", e);
        }
    };

    supervise(workers, WORKER_RESTART_BACKOFF, spawn_worker, shutdown).await;
    info!("Shutting down, unacknowledged messages will be redelivered.");
    Ok(())
}

/// Keeps `count` workers running until `shutdown` completes, restarting any worker that
/// returns or panics after `backoff`.
pub async fn supervise<F, Fut>(
    count: usize,
    backoff: Duration,
    mut spawn_worker: F,
    shutdown: impl Future<Output = ()>,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let mut workers = JoinSet::new();
    for _ in 0..count {
        workers.spawn(spawn_worker());
    }
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => return,
            Some(joined) = workers.join_next() => {
                match joined {
                    Ok(Ok(())) => warn!("Worker exited, restarting it."),
                    Ok(Err(e)) => error!("Worker failed, restarting it in {:?}: {:?}", backoff, e),
                    Err(e) => error!("Worker task died, restarting it in {:?}: {}", backoff, e),
                }
                sleep(backoff).await;
                workers.spawn(spawn_worker());
            }
        }
    }
}

/// Creates a single worker and runs its loop.
///
/// With `stop_on_sleep` the worker returns as soon as the queue is empty.
pub async fn create_worker(
    pool: PgPool,
    settings: AppSettings,
    mailer: Arc<dyn MailTransport>,
    stop_on_sleep: bool,
) -> Result<()> {
    declare_queue(&pool, &settings.queue.export_queue).await?;
    let context = WorkerContext::new(pool, settings, mailer);
    run_worker_loop(&context, stop_on_sleep).await
}

/// The main loop of one worker: claim up to `prefetch` messages, handle them one at a
/// time, acknowledge or reject each.
///
/// # Errors
///
/// Returns an error if the queue tables cannot be read or updated. The loop ends then.
pub async fn run_worker_loop(context: &WorkerContext, stop_on_sleep: bool) -> Result<()> {
    let consumer = &context.settings.consumer;
    let queue = &context.settings.queue.export_queue;
    info!("🛠️ [Worker ID: {}] Starting.", context.worker_id);
    let mut sleeping = false;

    loop {
        let messages = claim_messages(
            &context.pool,
            queue,
            &context.worker_id,
            consumer.prefetch,
            consumer.redelivery_timeout,
        )
        .await?;

        if messages.is_empty() {
            if !sleeping {
                sleeping = true;
                info!("💤 [Worker ID: {}] No messages, going to sleep...", context.worker_id);
                if stop_on_sleep {
                    return Ok(());
                }
            }
            sleep(consumer.poll_interval).await;
            continue;
        }
        sleeping = false;

        let heartbeat_handle =
            start_heartbeat_loop(&context.pool, &context.worker_id, consumer.heartbeat_interval);
        let result = process_batch(context, &messages).await;
        heartbeat_handle.abort();
        result?;
    }
}

async fn process_batch(context: &WorkerContext, messages: &[QueueMessage]) -> Result<()> {
    for message in messages {
        match handle_message(context, message).await {
            Disposition::Ack => {
                ack_message(&context.pool, message, &context.worker_id).await?;
            }
            Disposition::Reject(reason) => {
                reject_message(&context.pool, message, &context.worker_id, &reason).await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn failed_workers_are_replaced_until_shutdown() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let spawn_worker = move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 4 {
                    Err(eyre!("claim failed"))
                } else {
                    std::future::pending::<Result<()>>().await
                }
            }
        };

        supervise(
            2,
            Duration::from_millis(10),
            spawn_worker,
            sleep(Duration::from_millis(500)),
        )
        .await;

        // Two initial workers plus one replacement for each of the four failures.
        assert_eq!(started.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn shutdown_stops_healthy_workers() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let spawn_worker = move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<Result<()>>()
        };

        supervise(3, Duration::from_millis(10), spawn_worker, async {}).await;

        assert_eq!(started.load(Ordering::SeqCst), 3);
    }
}
