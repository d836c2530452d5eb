use ferrous_recursor_domain::RecordType;
use ferrous_recursor_infrastructure::dns::wire::header::FLAG_RESPONSE;
use ferrous_recursor_infrastructure::dns::wire::{Message, Question, ResourceRecord};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Assembles nameserver responses section by section.
pub struct ResponseBuilder {
    message: Message,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            message: Message {
                flags: FLAG_RESPONSE,
                ..Message::default()
            },
        }
    }

    pub fn question(mut self, name: &str, record_type: RecordType) -> Self {
        self.message.questions.push(Question::new(name, record_type));
        self
    }

    pub fn answer_a(mut self, name: &str, address: &str, ttl: u32) -> Self {
        let address: Ipv4Addr = address.parse().unwrap();
        self.message.answers.push(ResourceRecord::a(name, ttl, address));
        self
    }

    pub fn answer_aaaa(mut self, name: &str, address: &str, ttl: u32) -> Self {
        let address: Ipv6Addr = address.parse().unwrap();
        self.message
            .answers
            .push(ResourceRecord::aaaa(name, ttl, address));
        self
    }

    pub fn answer_cname(mut self, name: &str, canonical: &str) -> Self {
        self.message
            .answers
            .push(ResourceRecord::cname(name, 300, canonical).unwrap());
        self
    }

    pub fn authority_ns(mut self, zone: &str, nameserver: &str) -> Self {
        self.message
            .authorities
            .push(ResourceRecord::ns(zone, 172800, nameserver).unwrap());
        self
    }

    pub fn glue_a(mut self, name: &str, address: &str) -> Self {
        let address: Ipv4Addr = address.parse().unwrap();
        self.message
            .additionals
            .push(ResourceRecord::a(name, 172800, address));
        self
    }

    pub fn glue_aaaa(mut self, name: &str, address: &str) -> Self {
        let address: Ipv6Addr = address.parse().unwrap();
        self.message
            .additionals
            .push(ResourceRecord::aaaa(name, 172800, address));
        self
    }

    pub fn message(self) -> Message {
        self.message
    }

    pub fn build(self) -> Vec<u8> {
        self.message.encode().unwrap()
    }
}
