//! Ferrous Recursor Domain Layer
pub mod cache_entry;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod query_intent;
pub mod resolution;

pub use cache_entry::CacheEntry;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{RecordType, CLASS_IN};
pub use errors::DomainError;
pub use query_intent::QueryIntent;
pub use resolution::Resolution;
