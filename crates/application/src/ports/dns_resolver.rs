use async_trait::async_trait;
use ferrous_recursor_domain::{DnsQuery, DomainError, Resolution};

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError>;
}
