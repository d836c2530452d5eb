use ferrous_recursor_domain::config::ResolverConfig;
use ferrous_recursor_domain::ConfigError;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Runtime settings of the delegation walk, parsed from configuration.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub root_server: IpAddr,
    pub port: u16,
    pub query_timeout: Duration,
    pub max_iterations: usize,
    pub max_depth: usize,
    pub follow_cname: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            root_server: IpAddr::V4(Ipv4Addr::new(192, 5, 5, 241)),
            port: 53,
            query_timeout: Duration::from_secs(5),
            max_iterations: 32,
            max_depth: 8,
            follow_cname: true,
        }
    }
}

impl WalkConfig {
    pub fn from_resolver_config(config: &ResolverConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            root_server: config.root_address()?,
            port: config.port,
            query_timeout: config.timeout(),
            max_iterations: config.max_iterations,
            max_depth: config.max_depth,
            follow_cname: config.follow_cname,
        })
    }
}
