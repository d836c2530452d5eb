use ferrous_recursor_domain::{CacheEntry, DomainError};
use std::collections::BTreeMap;

/// Whole-document view of the cache: domain name to entry.
pub type CacheSnapshot = BTreeMap<String, CacheEntry>;

/// Port for the document store backing the resolution cache.
///
/// The store is read wholesale when a cache is created and rewritten
/// wholesale after each mutation. A missing document is an empty cache,
/// not an error. Concurrent writers follow last-writer-wins.
pub trait CacheStore: Send + Sync {
    fn load(&self) -> Result<CacheSnapshot, DomainError>;
    fn save(&self, snapshot: &CacheSnapshot) -> Result<(), DomainError>;
}
