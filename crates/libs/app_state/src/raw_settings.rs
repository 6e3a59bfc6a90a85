use serde::Deserialize;

/// Settings exactly as they appear in `config/settings.yaml` (plus `APP__` env overrides).
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub database: DatabaseSettings,
    pub queue: QueueSettings,
    pub consumer: RawConsumerSettings,
    pub mail: MailSettings,
    pub cache: RawCacheSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
}

/// Database connection pool configuration. Durations are in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: u64,
    pub idle_timeout: u64,
    pub acquire_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueueSettings {
    /// Name of the durable queue export jobs are published to.
    pub export_queue: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConsumerSettings {
    /// Number of independent consumer workers per process.
    pub workers: usize,
    /// Max claimed-but-unacknowledged messages a single worker holds.
    pub prefetch: usize,
    pub poll_interval_ms: u64,
    pub heartbeat_interval_seconds: u64,
    /// A delivered message whose heartbeat is older than this is handed to another worker.
    pub redelivery_timeout_seconds: u64,
    pub delivery_timeout_seconds: u64,
}

/// Outbound SMTP transport.
#[derive(Debug, Deserialize, Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawCacheSettings {
    pub album_likes_ttl_seconds: u64,
}
