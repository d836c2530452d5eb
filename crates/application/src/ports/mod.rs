mod cache_store;
mod dns_resolver;

pub use cache_store::{CacheSnapshot, CacheStore};
pub use dns_resolver::DnsResolver;

// Re-export for convenience
pub use ferrous_recursor_domain::DnsQuery;
