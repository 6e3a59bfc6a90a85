use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

const SETTINGS_PATH: &str = "config/settings.yaml";

/// Loads `config/settings.yaml` relative to the working directory, with `APP__` env overrides.
pub fn load_app_settings() -> Result<AppSettings> {
    load_settings_from_path(Path::new(SETTINGS_PATH), true)
}

pub fn load_settings_from_path(path: &Path, use_env: bool) -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    if use_env {
        dotenv::from_path(".env").ok();
    }
    let config_path = path.canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let mut builder = config::Config::builder().add_source(config::File::from(config_path));
    if use_env {
        builder = builder.add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}
