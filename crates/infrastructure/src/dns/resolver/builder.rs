use super::config::WalkConfig;
use super::iterative::IterativeResolver;
use crate::dns::cache::ResolutionCache;
use crate::dns::transport::DnsTransport;
use ferrous_recursor_application::ports::DnsResolver;
use std::sync::Arc;
use tracing::info;

pub struct ResolverBuilder {
    transport: Arc<dyn DnsTransport>,
    config: WalkConfig,
    cache: Option<Arc<ResolutionCache>>,
}

impl ResolverBuilder {
    pub fn new(transport: Arc<dyn DnsTransport>) -> Self {
        Self {
            transport,
            config: WalkConfig::default(),
            cache: None,
        }
    }

    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build_iterative(self) -> IterativeResolver {
        info!(
            transport = self.transport.protocol_name(),
            cache = self.cache.is_some(),
            "Building DNS resolver"
        );

        let resolver = IterativeResolver::new(self.transport, self.config);
        match self.cache {
            Some(cache) => resolver.with_cache(cache),
            None => resolver,
        }
    }

    pub fn build(self) -> Arc<dyn DnsResolver> {
        Arc::new(self.build_iterative())
    }
}
