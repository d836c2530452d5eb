use crate::dns::wire::{Message, ResourceRecord};
use ferrous_recursor_domain::{DomainError, QueryIntent, RecordType};
use rustc_hash::FxHashSet;
use std::net::IpAddr;

/// Nameserver that pointed the walk at its current server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referrer {
    pub name: String,
    pub address: IpAddr,
}

/// Query allowance for one whole resolution, shared by the top-level walk,
/// alias restarts and every nested nameserver walk.
#[derive(Debug)]
pub struct ExchangeBudget {
    limit: usize,
    spent: usize,
}

impl ExchangeBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, spent: 0 }
    }

    pub fn spent(&self) -> usize {
        self.spent
    }

    fn spend(&mut self, domain: &str) -> Result<(), DomainError> {
        if self.spent >= self.limit {
            return Err(DomainError::ResolutionDepthExceeded {
                domain: domain.to_string(),
                reason: format!("resolution did not finish within {} queries", self.limit),
            });
        }
        self.spent += 1;
        Ok(())
    }
}

/// State of one delegation walk, threaded through each exchange.
#[derive(Debug)]
pub struct WalkState {
    pub domain: String,
    pub intent: QueryIntent,
    pub current_server: IpAddr,
    pub referrer: Option<Referrer>,
    pub iterations: usize,
    visited: FxHashSet<IpAddr>,
}

impl WalkState {
    pub fn new(domain: impl Into<String>, intent: QueryIntent, root: IpAddr) -> Self {
        Self {
            domain: domain.into(),
            intent,
            current_server: root,
            referrer: None,
            iterations: 0,
            visited: FxHashSet::default(),
        }
    }

    /// Charges the next exchange to `budget` and returns the server to query.
    pub fn begin_exchange(&mut self, budget: &mut ExchangeBudget) -> Result<IpAddr, DomainError> {
        budget.spend(&self.domain)?;
        self.iterations += 1;
        self.visited.insert(self.current_server);
        Ok(self.current_server)
    }

    /// Moves the walk to `referrer.address`. Going back to a server already
    /// queried in this walk is a delegation cycle.
    pub fn follow(&mut self, referrer: Referrer) -> Result<(), DomainError> {
        if self.visited.contains(&referrer.address) {
            return Err(self.depth_exceeded(format!(
                "referral to {} ({}) loops back to a server already queried",
                referrer.name, referrer.address
            )));
        }
        self.current_server = referrer.address;
        self.referrer = Some(referrer);
        Ok(())
    }

    pub fn has_visited(&self, server: &IpAddr) -> bool {
        self.visited.contains(server)
    }

    fn depth_exceeded(&self, reason: String) -> DomainError {
        DomainError::ResolutionDepthExceeded {
            domain: self.domain.clone(),
            reason,
        }
    }
}

/// What a decoded response lets the walk do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// An address of the walk's wire type in the answer section.
    Answer { address: IpAddr, ttl: u32 },
    /// CNAME request answered with a CNAME record.
    CanonicalName(String),
    /// Address request answered only by an alias.
    Alias(String),
    /// Glue address in the additional section.
    Glue(Referrer),
    /// Nameserver named in the authority section, address unknown.
    Referral(String),
    Exhausted,
}

pub fn classify(response: &Message, intent: QueryIntent) -> Step {
    let wire_type = intent.wire_type();

    if intent.requested() == RecordType::CNAME {
        if let Some(target) = first_name_of(&response.answers, RecordType::CNAME) {
            return Step::CanonicalName(target.to_string());
        }
    }

    if let Some((address, ttl)) = response
        .answers
        .iter()
        .filter(|record| record.kind() == Some(wire_type))
        .find_map(|record| record.address().map(|address| (address, record.ttl)))
    {
        return Step::Answer { address, ttl };
    }

    if let QueryIntent::Address(_) = intent {
        if let Some(target) = first_name_of(&response.answers, RecordType::CNAME) {
            return Step::Alias(target.to_string());
        }
    }

    if let Some(glue) = response
        .additionals
        .iter()
        .filter(|record| record.kind() == Some(wire_type))
        .find_map(|record| {
            record.address().map(|address| Referrer {
                name: record.name.clone(),
                address,
            })
        })
    {
        return Step::Glue(glue);
    }

    if let Some(nameserver) = first_name_of(&response.authorities, RecordType::NS) {
        return Step::Referral(nameserver.to_string());
    }

    Step::Exhausted
}

fn first_name_of(records: &[ResourceRecord], record_type: RecordType) -> Option<&str> {
    records
        .iter()
        .filter(|record| record.kind() == Some(record_type))
        .find_map(|record| record.target_name())
        .filter(|name| !name.is_empty())
}
