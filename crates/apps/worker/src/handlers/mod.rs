use crate::context::WorkerContext;
use common_services::database::queue_message::QueueMessage;
use tracing::info;

pub mod export_playlist;

/// What to do with a message once its handler has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Ack,
    /// Reject without requeue, with the failure reason.
    Reject(String),
}

/// Dispatches a claimed message to its handler.
pub async fn handle_message(context: &WorkerContext, message: &QueueMessage) -> Disposition {
    info!(
        "🐜 Picked up message {} from {} (delivery {})",
        message.id, message.queue, message.delivery_count
    );
    export_playlist::handle(context, message).await.disposition()
}
