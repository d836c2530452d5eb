use crate::ports::DnsResolver;
use ferrous_recursor_domain::{DnsQuery, DomainError, RecordType, Resolution};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Result of resolving one name of a batch.
#[derive(Debug, Clone)]
pub struct NameResolutionOutcome {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub result: Result<Resolution, DomainError>,
}

/// Resolves names one after another through a `DnsResolver`.
///
/// TXT never reaches the resolver: it is answered here by a non-network stub
/// returning an opaque numeric token.
pub struct ResolveNamesUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveNamesUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute_one(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        if query.record_type == RecordType::TXT {
            let token = fastrand::u32(..10_000).to_string();
            debug!(domain = %query.domain, token = %token, "TXT answered by stub");
            return Ok(Resolution::Text(token));
        }

        let start = Instant::now();
        let result = self.resolver.resolve(query).await;

        match &result {
            Ok(resolution) => info!(
                domain = %query.domain,
                record_type = %query.record_type,
                answer = %resolution,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Resolved"
            ),
            Err(e) => info!(
                domain = %query.domain,
                record_type = %query.record_type,
                error = %e,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Resolution failed"
            ),
        }

        result
    }

    /// Resolves every name in order. A failure for one name does not stop
    /// the others.
    pub async fn execute<S: AsRef<str>>(
        &self,
        names: &[S],
        record_type: RecordType,
    ) -> Vec<NameResolutionOutcome> {
        let mut outcomes = Vec::with_capacity(names.len());

        for name in names {
            let query = DnsQuery::new(name.as_ref(), record_type);
            let result = self.execute_one(&query).await;
            outcomes.push(NameResolutionOutcome {
                name: query.domain,
                record_type,
                result,
            });
        }

        outcomes
    }
}
