use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

use super::errors::ConfigError;

/// f.root-servers.net, where every walk starts unless configured otherwise.
pub const DEFAULT_ROOT_SERVER: &str = "192.5.5.241";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Root server address every walk starts at. There is no fallback to
    /// other roots when it fails to answer.
    #[serde(default = "default_root_server")]
    pub root_server: String,

    /// Destination port for every exchange
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-exchange timeout in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Queries allowed for one resolution, nested nameserver walks included
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Nested nameserver resolutions allowed below a walk
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Largest datagram accepted from a nameserver
    #[serde(default = "default_max_response_size")]
    pub max_response_size: usize,

    /// Restart the walk for the canonical name when an answer holds only a CNAME
    #[serde(default = "default_true")]
    pub follow_cname: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: default_root_server(),
            port: default_port(),
            query_timeout: default_query_timeout(),
            max_iterations: default_max_iterations(),
            max_depth: default_max_depth(),
            max_response_size: default_max_response_size(),
            follow_cname: true,
        }
    }
}

impl ResolverConfig {
    pub fn root_address(&self) -> Result<IpAddr, ConfigError> {
        let server = self.root_server.trim();
        if server.is_empty() {
            return Err(ConfigError::Validation(
                "No root server configured".to_string(),
            ));
        }
        server.parse::<IpAddr>().map_err(|e| {
            ConfigError::Validation(format!("Invalid root server '{}': {}", server, e))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout)
    }
}

fn default_root_server() -> String {
    DEFAULT_ROOT_SERVER.to_string()
}

fn default_port() -> u16 {
    53
}

fn default_query_timeout() -> u64 {
    5
}

fn default_max_iterations() -> usize {
    32
}

fn default_max_depth() -> usize {
    8
}

fn default_max_response_size() -> usize {
    2048
}

fn default_true() -> bool {
    true
}
