use app_state::load_app_settings;
use clap::Parser;
use color_eyre::Result;
use common_services::database::{get_db_pool, run_migrations};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use worker::mailer::SmtpMailer;
use worker::worker::run_consumer;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Consumes playlist export jobs and mails the exports",
    long_about = None
)]
struct Args {
    /// Number of consumer workers. Overrides `consumer.workers`.
    #[clap(long, short)]
    workers: Option<usize>,

    /// Messages a worker may hold unacknowledged. Overrides `consumer.prefetch`.
    #[clap(long, short)]
    prefetch: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_app_settings()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "worker={0},common_services={0}",
            settings.logging.level
        ))
    });
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    color_eyre::install()?;

    if let Some(workers) = args.workers {
        settings.consumer.workers = workers.max(1);
    }
    if let Some(prefetch) = args.prefetch {
        settings.consumer.prefetch = prefetch.max(1);
    }

    let pool = get_db_pool(&settings.secrets.database_url, &settings.database).await?;
    run_migrations(&pool).await?;
    let mailer = Arc::new(SmtpMailer::new(&settings.mail)?);

    run_consumer(pool, settings, mailer).await
}
