use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_adapter_timeout_ms() -> u64 {
    8000
}

fn default_user_agent() -> String {
    concat!("qamus/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Outbound HTTP settings shared by every provider
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Upper bound for a single provider call
    #[serde(default = "default_adapter_timeout_ms")]
    pub adapter_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Skip every remote provider and answer from the word list only
    #[serde(default)]
    pub offline: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            adapter_timeout_ms: default_adapter_timeout_ms(),
            user_agent: default_user_agent(),
            offline: false,
        }
    }
}

impl NetworkConfig {
    /// Overlay `QAMUS_ADAPTER_TIMEOUT_MS` and `QAMUS_OFFLINE`
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(ms) = lookup("QAMUS_ADAPTER_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.adapter_timeout_ms = ms;
        }
        if let Some(offline) = lookup("QAMUS_OFFLINE") {
            self.offline = offline == "1" || offline.eq_ignore_ascii_case("true");
        }
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_millis(self.adapter_timeout_ms)
    }
}
