use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::cache::LikeCountCache;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub like_cache: LikeCountCache,
}

impl ApiContext {
    #[must_use]
    pub fn new(pool: PgPool, settings: AppSettings) -> Self {
        let like_cache = LikeCountCache::new(settings.cache.album_likes_ttl);
        Self {
            pool,
            settings,
            like_cache,
        }
    }
}

// Lets extractors that only need one part of the state pull it directly.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for LikeCountCache {
    fn from_ref(state: &ApiContext) -> Self {
        state.like_cache.clone()
    }
}
