use super::DnsServices;
use ferrous_recursor_application::use_cases::ResolveNamesUseCase;
use std::sync::Arc;

pub struct UseCases {
    pub resolve_names: Arc<ResolveNamesUseCase>,
}

impl UseCases {
    pub fn new(dns: &DnsServices) -> Self {
        Self {
            resolve_names: Arc::new(ResolveNamesUseCase::new(dns.resolver.clone())),
        }
    }
}
