use crate::runner::context::context_utils::{
    create_test_database, create_test_settings, force_drop_db,
};
use crate::test_helpers::seed_catalog;
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::eyre::{Result, eyre};
use reqwest::Client;
use sqlx::PgPool;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The main context for the integration tests.
///
/// The API runs as a background task. The export worker is started by the tests that
/// need it, so they can swap in a recording mail transport.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: Client,
    pub base_url: String,
    db_name: String,
    management_pool: PgPool,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../config/settings.yaml")
            .canonicalize()?;
        let base_settings = load_settings_from_path(&settings_path, true)?;

        // 1. Set up the dedicated test database
        let db_name = "openmusic_test".to_owned();
        let (main_pool, management_pool) = create_test_database(&base_settings, &db_name).await?;
        seed_catalog(&main_pool).await?;

        // 2. Generate the final settings for this test run
        let settings = create_test_settings(&db_name, &base_settings)?;
        let base_url = format!("http://{}:{}", settings.api.host, settings.api.port);

        // 3. Spawn the API
        let api_pool = main_pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        // 4. Wait for the API to be ready to accept traffic
        let http_client = Client::new();
        Self::wait_for_healthy_api(&base_url, &http_client).await?;

        info!("Test environment is ready.");
        Ok(Self {
            pool: main_pool,
            settings,
            http_client,
            base_url,
            db_name,
            management_pool,
            api_handle,
        })
    }

    /// Polls `/health` until it succeeds or gives up.
    async fn wait_for_healthy_api(base_url: &str, http_client: &Client) -> Result<()> {
        for attempt in 1..=20 {
            info!("Health check attempt {}...", attempt);
            match http_client.get(format!("{base_url}/health")).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("API is healthy!");
                    return Ok(());
                }
                Ok(response) => {
                    warn!(
                        "API health check returned non-success status: {}",
                        response.status()
                    );
                }
                Err(e) => {
                    warn!("API health check failed: {:?}. Retrying...", e);
                }
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Err(eyre!("API did not become healthy within the timeout period."))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.api_handle.abort();

        let db_name = self.db_name.clone();
        let pool = self.management_pool.clone();
        tokio::spawn(async move {
            info!("Dropping test database: {}", db_name);
            if let Err(e) = force_drop_db(&pool, &db_name).await {
                warn!("Failed to drop test database {}: {}", db_name, e);
            }
        });

        info!("Teardown complete.");
    }
}
