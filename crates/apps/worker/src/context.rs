use crate::mailer::MailTransport;
use app_state::AppSettings;
use common_services::utils::nice_id;
use sqlx::PgPool;
use std::sync::Arc;

pub struct WorkerContext {
    pub worker_id: String,
    pub pool: PgPool,
    pub settings: AppSettings,
    pub mailer: Arc<dyn MailTransport>,
}

impl WorkerContext {
    /// Creates a context with a fresh worker id.
    #[must_use]
    pub fn new(pool: PgPool, settings: AppSettings, mailer: Arc<dyn MailTransport>) -> Self {
        Self {
            worker_id: nice_id(8),
            pool,
            settings,
            mailer,
        }
    }
}
