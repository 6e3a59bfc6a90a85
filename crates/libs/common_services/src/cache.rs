use moka::future::Cache as MokaCache;
use std::sync::Arc;
use std::time::Duration;

/// Advisory per-album like counts.
///
/// Entries expire after the configured TTL and are dropped whenever a like is added or
/// removed, so a stale count never outlives a write made through this process.
#[derive(Clone)]
pub struct LikeCountCache {
    counts: Arc<MokaCache<String, i64>>,
}

impl LikeCountCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            counts: Arc::new(
                MokaCache::builder()
                    .max_capacity(10_000)
                    .time_to_live(ttl)
                    .build(),
            ),
        }
    }

    #[must_use]
    pub fn key(album_id: &str) -> String {
        format!("album:{album_id}:likes")
    }

    pub async fn get(&self, album_id: &str) -> Option<i64> {
        self.counts.get(&Self::key(album_id)).await
    }

    pub async fn insert(&self, album_id: &str, likes: i64) {
        self.counts.insert(Self::key(album_id), likes).await;
    }

    pub async fn invalidate(&self, album_id: &str) {
        self.counts.invalidate(&Self::key(album_id)).await;
    }
}
