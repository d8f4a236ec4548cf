use std::env;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::dictionary::DictionaryConfig;
use self::network::NetworkConfig;
use self::providers::ProvidersConfig;
use self::ui::UiConfig;

pub mod cache;
pub mod dictionary;
pub mod network;
pub mod providers;
pub mod ui;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub ui: UiConfig,
    pub cache: CacheConfig,
    pub dictionary: DictionaryConfig,
    pub providers: ProvidersConfig,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Overlay environment variables on a loaded config
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Overlay values from `lookup`. Keys it does not know keep their current value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.network.apply_overrides(&lookup);
        self.cache.apply_overrides(&lookup);
        self.providers.apply_overrides(&lookup);
    }
}
