use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Consult and populate the address cache for plain A lookups
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// JSON document backing the cache between runs
    #[serde(default = "default_cache_path")]
    pub path: String,

    /// When false the cache lives only in memory for the current run
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_cache_path(),
            persist: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_path() -> String {
    "dns-cache.json".to_string()
}
