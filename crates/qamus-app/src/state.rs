use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use qamus_config::Config;
use qamus_core::{LocalIndex, ResultCache};
use qamus_lang_arabic::{DictionaryLoader, Sources};
use tokio::sync::RwLock;

use crate::aggregator::Aggregator;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub aggregator: Arc<Aggregator>,
    /// Bumped for every query; results of older generations are discarded
    pub generation: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let index = DictionaryLoader::load_with_additional(
            config.dictionary.enabled,
            &config.dictionary.additional_paths,
        );
        let cache = ResultCache::new(config.cache.capacity, config.cache.expiry());

        let aggregator = Aggregator::new(Arc::new(index), Arc::new(cache))
            .with_sources(Sources::from_config(&config))
            .with_adapter_timeout(config.network.adapter_timeout());

        Self::with_aggregator(config, aggregator)
    }

    pub fn with_aggregator(config: Config, aggregator: Aggregator) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            aggregator: Arc::new(aggregator),
            generation: AtomicU64::new(0),
        }
    }

    /// State with only a local word list, no remote providers
    pub fn offline(config: Config, index: LocalIndex) -> Self {
        let cache = ResultCache::new(config.cache.capacity, config.cache.expiry());
        let aggregator = Aggregator::new(Arc::new(index), Arc::new(cache));
        Self::with_aggregator(config, aggregator)
    }

    /// Start a new query generation and return it
    pub fn begin_query(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
