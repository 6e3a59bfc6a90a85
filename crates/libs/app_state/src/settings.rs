use crate::{
    ApiSettings, DatabaseSettings, LoggingSettings, MailSettings, QueueSettings, RawSettings,
    SecretSettings,
};
use color_eyre::eyre::{Report, bail};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub secrets: SecretSettings,
    pub database: DatabaseSettings,
    pub queue: QueueSettings,
    pub consumer: ConsumerSettings,
    pub mail: MailSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone)]
pub struct ConsumerSettings {
    pub workers: usize,
    pub prefetch: usize,
    pub poll_interval: Duration,
    pub heartbeat_interval: Duration,
    pub redelivery_timeout: Duration,
    pub delivery_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub album_likes_ttl: Duration,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = Report;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let consumer = ConsumerSettings {
            // Zero would stall the consumer.
            workers: raw.consumer.workers.max(1),
            prefetch: raw.consumer.prefetch.max(1),
            poll_interval: Duration::from_millis(raw.consumer.poll_interval_ms),
            heartbeat_interval: Duration::from_secs(raw.consumer.heartbeat_interval_seconds),
            redelivery_timeout: Duration::from_secs(raw.consumer.redelivery_timeout_seconds),
            delivery_timeout: Duration::from_secs(raw.consumer.delivery_timeout_seconds),
        };
        consumer.validate()?;

        Ok(Self {
            api: raw.api,
            logging: raw.logging,
            secrets: raw.secrets,
            database: raw.database,
            queue: raw.queue,
            consumer,
            mail: raw.mail,
            cache: CacheSettings {
                album_likes_ttl: Duration::from_secs(raw.cache.album_likes_ttl_seconds),
            },
        })
    }
}

impl ConsumerSettings {
    /// Rejects timings under which a live worker's messages would be handed out twice,
    /// or the worker loop would spin.
    pub fn validate(&self) -> Result<(), Report> {
        if self.poll_interval.is_zero() {
            bail!("consumer.poll_interval_ms must be greater than 0");
        }
        if self.heartbeat_interval.is_zero() {
            bail!("consumer.heartbeat_interval_seconds must be greater than 0");
        }
        if self.delivery_timeout.is_zero() {
            bail!("consumer.delivery_timeout_seconds must be greater than 0");
        }
        if self.heartbeat_interval >= self.redelivery_timeout {
            bail!(
                "consumer.heartbeat_interval_seconds ({:?}) must be shorter than \
                 consumer.redelivery_timeout_seconds ({:?})",
                self.heartbeat_interval,
                self.redelivery_timeout
            );
        }
        Ok(())
    }
}
