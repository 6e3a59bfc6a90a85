use app_state::AppSettings;
use color_eyre::eyre::{Result, eyre};
use common_services::database::{get_db_pool, run_migrations};
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use tracing::info;
use url::Url;

/// Points the settings at the test database and a free local port.
pub fn create_test_settings(
    database_name: &str,
    base_settings: &AppSettings,
) -> Result<AppSettings> {
    let mut settings = base_settings.clone();
    settings.api.host = "127.0.0.1".to_owned();
    settings.api.port = u32::from(get_free_port()?);

    let mut db_url = Url::parse(&settings.secrets.database_url)?;
    db_url.set_path(&format!("/{database_name}"));
    settings.secrets.database_url = db_url.to_string();

    Ok(settings)
}

/// Recreates `database_name` and runs migrations on it.
///
/// Returns the pool for the test database and one for the `postgres` management database.
pub async fn create_test_database(
    base_settings: &AppSettings,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    let mut management_db_url = Url::parse(&base_settings.secrets.database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = get_db_pool(management_db_url.as_str(), &base_settings.database).await?;
    force_drop_db(&management_pool, database_name).await?;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(&base_settings.secrets.database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = get_db_pool(test_db_url.as_str(), &base_settings.database).await?;

    run_migrations(&main_pool).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) -> Result<()> {
    management_pool
        .execute(format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)").as_str())
        .await?;
    Ok(())
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener
        .local_addr()
        .map_err(|e| eyre!("No local address: {e}"))?
        .port())
}
