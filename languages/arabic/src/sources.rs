use std::sync::Arc;

use qamus_config::Config;
use qamus_sources::{SourceAdapter, Translator};

use crate::free_dictionary::FreeDictionary;
use crate::glosbe::Glosbe;
use crate::translator::LibreTranslator;
use crate::wordnik::Wordnik;

/// Providers wired from configuration
pub struct Sources {
    /// Definition providers in priority order
    pub definitions: Vec<Arc<dyn SourceAdapter>>,
    pub phrases: Option<Arc<dyn SourceAdapter>>,
    pub translator: Option<Arc<dyn Translator>>,
}

impl Sources {
    pub fn from_config(config: &Config) -> Self {
        if config.network.offline {
            tracing::info!("Offline mode, remote providers disabled");
            return Self::none();
        }

        let client = reqwest::Client::builder()
            .user_agent(config.network.user_agent.clone())
            .timeout(config.network.adapter_timeout())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            });

        let providers = &config.providers;
        let mut definitions: Vec<Arc<dyn SourceAdapter>> = Vec::new();

        if providers.free_dictionary.enabled {
            definitions.push(Arc::new(FreeDictionary::new(
                client.clone(),
                providers.free_dictionary.api_url.clone(),
                providers.definition_cap,
            )));
        }

        if providers.wordnik.enabled {
            if providers.wordnik.api_key.is_empty() {
                tracing::info!("Wordnik has no API key and will be skipped");
            }
            definitions.push(Arc::new(Wordnik::new(
                client.clone(),
                providers.wordnik.api_url.clone(),
                providers.wordnik.api_key.clone(),
                providers.definition_cap,
            )));
        }

        let phrases: Option<Arc<dyn SourceAdapter>> = providers.glosbe.enabled.then(|| {
            Arc::new(Glosbe::new(
                client.clone(),
                providers.glosbe.api_url.clone(),
                providers.phrase_cap,
            )) as Arc<dyn SourceAdapter>
        });

        let translator: Option<Arc<dyn Translator>> = providers.libretranslate.enabled.then(|| {
            Arc::new(LibreTranslator::new(
                client.clone(),
                providers.libretranslate.api_key.clone(),
                providers.libretranslate.api_url.clone(),
            )) as Arc<dyn Translator>
        });

        Self {
            definitions,
            phrases,
            translator,
        }
    }

    /// No remote providers at all
    pub fn none() -> Self {
        Self {
            definitions: Vec::new(),
            phrases: None,
            translator: None,
        }
    }
}
