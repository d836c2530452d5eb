use super::config::WalkConfig;
use super::walk::{classify, ExchangeBudget, Referrer, Step, WalkState};
use crate::dns::cache::ResolutionCache;
use crate::dns::transport::DnsTransport;
use crate::dns::wire::{Message, MessageBuilder};
use async_trait::async_trait;
use ferrous_recursor_application::ports::DnsResolver;
use ferrous_recursor_domain::{DnsQuery, DomainError, QueryIntent, RecordType, Resolution};
use futures::future::BoxFuture;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Names being resolved by the walks currently on the stack, outermost
/// first, and the query budget they draw from. Shared by a top-level walk
/// and every walk nested below it.
#[derive(Debug)]
struct WalkStack {
    names: Vec<String>,
    budget: ExchangeBudget,
}

impl WalkStack {
    fn new(max_exchanges: usize) -> Self {
        Self {
            names: Vec::new(),
            budget: ExchangeBudget::new(max_exchanges),
        }
    }

    fn contains(&self, domain: &str) -> bool {
        self.names.iter().any(|name| name.eq_ignore_ascii_case(domain))
    }

    fn nested_depth(&self) -> usize {
        self.names.len()
    }
}

/// Resolver that walks the delegation tree from a root server.
///
/// Each exchange sends one query to the current server and acts on the
/// first usable shape of the response: an answer ends the walk, a glue
/// address moves it, a bare nameserver referral resolves that nameserver's
/// address through a nested walk. Cycles are cut by a per-walk set of
/// queried servers, one query bound for the whole resolution including its
/// nested walks, a nesting bound, and a check for a nameserver whose address
/// lookup needs itself.
pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    cache: Option<Arc<ResolutionCache>>,
    config: WalkConfig,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, config: WalkConfig) -> Self {
        info!(
            root = %config.root_server,
            port = config.port,
            timeout_ms = config.query_timeout.as_millis() as u64,
            max_iterations = config.max_iterations,
            max_depth = config.max_depth,
            "Iterative resolver created"
        );

        Self {
            transport,
            cache: None,
            config,
        }
    }

    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&Arc<ResolutionCache>> {
        self.cache.as_ref()
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Resolves `domain` for `record_type`. TXT has no walk and fails with
    /// `UnsupportedRecordType`.
    pub async fn resolve_name(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Resolution, DomainError> {
        let intent = QueryIntent::from_requested(record_type)?;
        let mut stack = WalkStack::new(self.config.max_iterations);
        let result = self.walk(domain, intent, &mut stack).await;
        debug!(
            domain = %domain,
            exchanges = stack.budget.spent(),
            "Resolution finished"
        );
        result
    }

    fn walk<'a>(
        &'a self,
        domain: &'a str,
        intent: QueryIntent,
        stack: &'a mut WalkStack,
    ) -> BoxFuture<'a, Result<Resolution, DomainError>> {
        Box::pin(async move {
            if stack.contains(domain) {
                return Err(DomainError::ResolutionDepthExceeded {
                    domain: domain.to_string(),
                    reason: "name is already being resolved further up the walk".to_string(),
                });
            }
            if stack.nested_depth() > self.config.max_depth {
                return Err(DomainError::ResolutionDepthExceeded {
                    domain: domain.to_string(),
                    reason: format!("more than {} nested resolutions", self.config.max_depth),
                });
            }

            stack.names.push(domain.to_string());
            let result = self.run_walk(domain, intent, stack).await;
            stack.names.pop();
            result
        })
    }

    async fn run_walk(
        &self,
        domain: &str,
        intent: QueryIntent,
        stack: &mut WalkStack,
    ) -> Result<Resolution, DomainError> {
        if intent.is_cacheable() {
            if let Some(address) = self.cache.as_ref().and_then(|cache| cache.get(domain)) {
                return Ok(Resolution::Address(address));
            }
        }

        let mut state = WalkState::new(domain, intent, self.config.root_server);

        loop {
            let server = state.begin_exchange(&mut stack.budget)?;
            let response = self.exchange(server, domain, intent.wire_type()).await?;

            match classify(&response, intent) {
                Step::Answer { address, ttl } => {
                    return self.finish(&state, address, ttl);
                }
                Step::CanonicalName(name) => {
                    debug!(domain = %domain, canonical = %name, "Canonical name found");
                    return Ok(Resolution::CanonicalName(name));
                }
                Step::Alias(target) => {
                    if !self.config.follow_cname {
                        debug!(domain = %domain, alias = %target, "Alias not followed");
                        return Err(DomainError::ResolutionExhausted {
                            domain: domain.to_string(),
                        });
                    }
                    debug!(domain = %domain, alias = %target, "Restarting walk for alias target");
                    return self.walk(&target, intent, stack).await;
                }
                Step::Glue(referrer) => {
                    debug!(
                        domain = %domain,
                        nameserver = %referrer.name,
                        server = %referrer.address,
                        "Following glue"
                    );
                    state.follow(referrer)?;
                }
                Step::Referral(nameserver) => {
                    debug!(
                        domain = %domain,
                        nameserver = %nameserver,
                        "Referral without glue, resolving nameserver address"
                    );
                    let address = self
                        .walk(&nameserver, QueryIntent::Address(RecordType::A), stack)
                        .await?
                        .address()
                        .ok_or_else(|| DomainError::ResolutionExhausted {
                            domain: nameserver.clone(),
                        })?;
                    state.follow(Referrer {
                        name: nameserver,
                        address,
                    })?;
                }
                Step::Exhausted => {
                    debug!(domain = %domain, server = %server, "No answer, glue or referral");
                    return Err(DomainError::ResolutionExhausted {
                        domain: domain.to_string(),
                    });
                }
            }
        }
    }

    fn finish(
        &self,
        state: &WalkState,
        address: IpAddr,
        ttl: u32,
    ) -> Result<Resolution, DomainError> {
        debug!(
            domain = %state.domain,
            address = %address,
            ttl = ttl,
            iterations = state.iterations,
            "Answer found"
        );

        if state.intent.requested() == RecordType::NS {
            return match &state.referrer {
                Some(referrer) => Ok(Resolution::NameServer {
                    name: referrer.name.clone(),
                    address: referrer.address,
                }),
                None => Err(DomainError::ResolutionExhausted {
                    domain: state.domain.clone(),
                }),
            };
        }

        if state.intent.is_cacheable() {
            if let Some(cache) = &self.cache {
                cache.put(&state.domain, address, i64::from(ttl));
            }
        }

        Ok(Resolution::Address(address))
    }

    async fn exchange(
        &self,
        server: IpAddr,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Message, DomainError> {
        let (id, query) = MessageBuilder::build_query_with_id(domain, record_type)?;
        let target = SocketAddr::new(server, self.config.port);

        debug!(
            domain = %domain,
            record_type = %record_type,
            server = %target,
            "Sending query"
        );

        let response = self
            .transport
            .send(target, &query, self.config.query_timeout)
            .await?;
        let message = Message::decode(&response.bytes)?;

        if message.id != id {
            warn!(
                server = %target,
                expected_id = id,
                received_id = message.id,
                "Response transaction id mismatch"
            );
        }

        debug!(
            server = %target,
            answers = message.answers.len(),
            authorities = message.authorities.len(),
            additionals = message.additionals.len(),
            "Response decoded"
        );

        Ok(message)
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        self.resolve_name(&query.domain, query.record_type).await
    }
}
