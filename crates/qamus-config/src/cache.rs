use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_capacity() -> usize {
    100
}

fn default_expiry_secs() -> u64 {
    30 * 60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached lookups
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            expiry_secs: default_expiry_secs(),
        }
    }
}

impl CacheConfig {
    /// Overlay `QAMUS_CACHE_CAPACITY` and `QAMUS_CACHE_EXPIRY_SECS`
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(capacity) = lookup("QAMUS_CACHE_CAPACITY").and_then(|v| v.parse().ok()) {
            self.capacity = capacity;
        }
        if let Some(secs) = lookup("QAMUS_CACHE_EXPIRY_SECS").and_then(|v| v.parse().ok()) {
            self.expiry_secs = secs;
        }
    }

    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_secs)
    }
}
