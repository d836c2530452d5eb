use super::clock::Clock;
use super::metrics::CacheMetrics;
use dashmap::DashMap;
use ferrous_recursor_application::ports::{CacheSnapshot, CacheStore};
use ferrous_recursor_domain::{CacheEntry, DomainError};
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// TTL-bounded domain to address mapping with lazy eviction.
///
/// Keys are the literal domain strings given by callers; no case folding or
/// trailing-dot stripping happens here. Every `get` and `put` first drops
/// all expired entries, and each mutation rewrites the backing store.
/// Store failures are logged and never fail the caller: the in-memory map
/// stays authoritative for the life of the cache.
pub struct ResolutionCache {
    entries: DashMap<String, CacheEntry, FxBuildHasher>,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    metrics: CacheMetrics,
}

impl ResolutionCache {
    pub fn empty(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            store,
            clock,
            metrics: CacheMetrics::default(),
        }
    }

    /// Creates a cache seeded with the store's current document.
    pub fn load(store: Arc<dyn CacheStore>, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        let snapshot = store.load()?;
        let cache = Self::empty(store, clock);

        for (domain, entry) in snapshot {
            cache.entries.insert(domain, entry);
        }

        info!(entries = cache.entries.len(), "Resolution cache loaded");
        Ok(cache)
    }

    pub fn get(&self, domain: &str) -> Option<IpAddr> {
        self.evict_expired();

        match self.entries.get(domain) {
            Some(entry) => {
                CacheMetrics::bump(&self.metrics.hits, 1);
                debug!(domain = %domain, address = %entry.address, "Cache hit");
                Some(entry.address)
            }
            None => {
                CacheMetrics::bump(&self.metrics.misses, 1);
                debug!(domain = %domain, "Cache miss");
                None
            }
        }
    }

    /// Stores `address` for `domain` until `ttl_secs` from now. A zero or
    /// negative TTL stores an entry the next access will evict.
    pub fn put(&self, domain: &str, address: IpAddr, ttl_secs: i64) {
        self.evict_expired();

        let entry = CacheEntry::with_ttl(address, self.clock.now(), ttl_secs);
        debug!(
            domain = %domain,
            address = %address,
            expires_at = %entry.expires_at,
            "Cache insert"
        );
        self.entries.insert(domain.to_string(), entry);
        CacheMetrics::bump(&self.metrics.insertions, 1);

        self.persist();
    }

    /// Full entry for `domain`, expired or not. Does not sweep.
    pub fn peek(&self, domain: &str) -> Option<CacheEntry> {
        self.entries.get(domain).map(|entry| entry.value().clone())
    }

    /// Removes every expired entry, rewriting the store when anything was
    /// removed. Returns the number of entries dropped.
    pub fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            CacheMetrics::bump(&self.metrics.lazy_deletions, removed as u64);
            debug!(removed = removed, "Expired cache entries evicted");
            self.persist();
        }

        removed
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            CacheMetrics::bump(&self.metrics.persist_failures, 1);
            warn!(error = %e, "Failed to persist resolution cache");
        }
    }
}
