use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::middleware::rate_limit::RateLimiter;

/// Shared application state: the owned connection pool, configuration, and
/// the rate-limiter window map. Cloning is cheap; everything inside is a
/// handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.api.rate_limit_requests,
            std::time::Duration::from_secs(config.api.rate_limit_window_secs),
        ));
        Self {
            pool,
            config: Arc::new(config),
            limiter,
        }
    }
}
