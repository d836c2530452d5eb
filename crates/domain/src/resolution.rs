use std::fmt;
use std::net::IpAddr;

/// Final outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Address(IpAddr),
    /// The nameserver whose glue address led to the answer.
    NameServer {
        name: String,
        address: IpAddr,
    },
    CanonicalName(String),
    Text(String),
}

impl Resolution {
    pub fn address(&self) -> Option<IpAddr> {
        match self {
            Resolution::Address(address) | Resolution::NameServer { address, .. } => {
                Some(*address)
            }
            Resolution::CanonicalName(_) | Resolution::Text(_) => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Address(address) => write!(f, "{}", address),
            Resolution::NameServer { name, address } => write!(f, "{} {}", name, address),
            Resolution::CanonicalName(name) => write!(f, "{}", name),
            Resolution::Text(text) => write!(f, "{}", text),
        }
    }
}
