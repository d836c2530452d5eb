use ferrous_recursor_application::ports::{CacheStore, DnsResolver};
use ferrous_recursor_domain::Config;
use ferrous_recursor_infrastructure::dns::{
    ResolutionCache, ResolverBuilder, SystemClock, UdpTransport, WalkConfig,
};
use ferrous_recursor_infrastructure::repositories::{InMemoryCacheStore, JsonFileCacheStore};
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub resolver: Arc<dyn DnsResolver>,
    pub cache: Option<Arc<ResolutionCache>>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let walk_config = WalkConfig::from_resolver_config(&config.resolver)?;
        let transport = Arc::new(UdpTransport::new(config.resolver.max_response_size));

        let cache = config.cache.enabled.then(|| Self::build_cache(config));

        let mut builder = ResolverBuilder::new(transport).with_config(walk_config);
        if let Some(cache) = &cache {
            builder = builder.with_cache(cache.clone());
        }

        Ok(Self {
            resolver: builder.build(),
            cache,
        })
    }

    fn build_cache(config: &Config) -> Arc<ResolutionCache> {
        let store: Arc<dyn CacheStore> = if config.cache.persist {
            info!(path = %config.cache.path, "Using file-backed resolution cache");
            Arc::new(JsonFileCacheStore::new(&config.cache.path))
        } else {
            info!("Using in-memory resolution cache");
            Arc::new(InMemoryCacheStore::new())
        };
        let clock = Arc::new(SystemClock);

        let cache = match ResolutionCache::load(store.clone(), clock.clone()) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(error = %e, "Cache document unreadable, starting with an empty cache");
                ResolutionCache::empty(store, clock)
            }
        };

        Arc::new(cache)
    }
}
