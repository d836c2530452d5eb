use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-recursor.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-recursor/config.toml";

/// Main configuration structure for Ferrous Recursor
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Delegation walk configuration (root servers, timeouts, bounds)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Address cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-recursor.toml in current directory
    /// 3. /etc/ferrous-recursor/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(root) = overrides.root_server {
            self.resolver.root_server = root;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(timeout) = overrides.query_timeout {
            self.resolver.query_timeout = timeout;
        }
        if let Some(path) = overrides.cache_path {
            self.cache.path = path;
        }
        if overrides.disable_cache {
            self.cache.enabled = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.root_address()?;

        if self.resolver.port == 0 {
            return Err(ConfigError::Validation(
                "Resolver port cannot be 0".to_string(),
            ));
        }
        if self.resolver.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }
        if self.resolver.max_iterations == 0 || self.resolver.max_depth == 0 {
            return Err(ConfigError::Validation(
                "Walk bounds (max_iterations, max_depth) must be at least 1".to_string(),
            ));
        }
        if self.resolver.max_response_size < 12 {
            return Err(ConfigError::Validation(format!(
                "max_response_size {} cannot hold a DNS header",
                self.resolver.max_response_size
            )));
        }
        if self.cache.enabled && self.cache.persist && self.cache.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Persistent cache enabled without a cache path".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root_server: Option<String>,
    pub port: Option<u16>,
    pub query_timeout: Option<u64>,
    pub cache_path: Option<String>,
    pub disable_cache: bool,
    pub log_level: Option<String>,
}
