#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_recursor_application::ports::DnsResolver;
use ferrous_recursor_domain::{DnsQuery, DomainError, RecordType, Resolution};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct MockDnsResolver {
    responses: Arc<RwLock<HashMap<String, Resolution>>>,
    error_responses: Arc<std::sync::RwLock<HashMap<String, DomainError>>>,
    calls: Arc<Mutex<Vec<(String, RecordType)>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            error_responses: Arc::new(std::sync::RwLock::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn set_response(&self, domain: &str, resolution: Resolution) {
        self.responses
            .write()
            .await
            .insert(domain.to_string(), resolution);
    }

    pub fn set_response_error(&self, domain: &str, error: DomainError) {
        self.error_responses
            .write()
            .unwrap()
            .insert(domain.to_string(), error);
    }

    pub fn calls(&self) -> Vec<(String, RecordType)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.domain.to_string(), query.record_type));

        if let Some(err) = self
            .error_responses
            .read()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
        {
            return Err(err);
        }

        let responses = self.responses.read().await;
        responses
            .get(query.domain.as_ref())
            .cloned()
            .ok_or_else(|| DomainError::ResolutionExhausted {
                domain: query.domain.to_string(),
            })
    }
}
