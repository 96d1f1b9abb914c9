use std::sync::Arc;

use lscache::CacheConfig;
use tower::Layer;

use crate::service::LiteSpeedCacheService;

/// Layer applying [`LiteSpeedCacheService`] with a shared configuration.
#[derive(Debug, Clone, Default)]
pub struct LiteSpeedCacheLayer {
    config: Arc<CacheConfig>,
}

impl LiteSpeedCacheLayer {
    /// Creates a layer owning `config`.
    pub fn new(config: CacheConfig) -> Self {
        Self::from_arc(Arc::new(config))
    }

    /// Shares an existing configuration.
    pub fn from_arc(config: Arc<CacheConfig>) -> Self {
        Self { config }
    }

    /// Configuration shared with every service.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl<S> Layer<S> for LiteSpeedCacheLayer {
    type Service = LiteSpeedCacheService<S>;

    fn layer(&self, upstream: S) -> Self::Service {
        LiteSpeedCacheService::new(upstream, Arc::clone(&self.config))
    }
}
