use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// A cached address with its absolute expiry. The domain is the key of the
/// cache mapping and is not repeated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub address: IpAddr,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(address: IpAddr, expires_at: DateTime<Utc>) -> Self {
        Self {
            address,
            expires_at,
        }
    }

    /// Builds an entry expiring `ttl_secs` after `now`. Zero or negative TTLs
    /// produce an entry that is already expired.
    pub fn with_ttl(address: IpAddr, now: DateTime<Utc>, ttl_secs: i64) -> Self {
        let expires_at = TimeDelta::try_seconds(ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(if ttl_secs < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });

        Self::new(address, expires_at)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn remaining_ttl(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
