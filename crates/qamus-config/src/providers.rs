use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_free_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

fn default_wordnik_url() -> String {
    "https://api.wordnik.com/v4/word.json".to_string()
}

fn default_glosbe_url() -> String {
    "https://glosbe.com/gapi/translate".to_string()
}

fn default_libretranslate_url() -> String {
    "https://libretranslate.com/translate".to_string()
}

/// Definitions kept per part of speech
fn default_definition_cap() -> usize {
    4
}

/// Distinct phrases kept from a phrase lookup
fn default_phrase_cap() -> usize {
    8
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FreeDictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_free_dictionary_url")]
    pub api_url: String,
}

impl Default for FreeDictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_free_dictionary_url(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WordnikConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_wordnik_url")]
    pub api_url: String,
    /// Requests are skipped while this is empty
    #[serde(default)]
    pub api_key: String,
}

impl Default for WordnikConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_wordnik_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GlosbeConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_glosbe_url")]
    pub api_url: String,
}

impl Default for GlosbeConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_glosbe_url(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LibreTranslateConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_libretranslate_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for LibreTranslateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_libretranslate_url(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProvidersConfig {
    pub free_dictionary: FreeDictionaryConfig,
    pub wordnik: WordnikConfig,
    pub glosbe: GlosbeConfig,
    pub libretranslate: LibreTranslateConfig,
    #[serde(default = "default_definition_cap")]
    pub definition_cap: usize,
    #[serde(default = "default_phrase_cap")]
    pub phrase_cap: usize,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            free_dictionary: FreeDictionaryConfig::default(),
            wordnik: WordnikConfig::default(),
            glosbe: GlosbeConfig::default(),
            libretranslate: LibreTranslateConfig::default(),
            definition_cap: default_definition_cap(),
            phrase_cap: default_phrase_cap(),
        }
    }
}

impl ProvidersConfig {
    /// Overlay API keys, the LibreTranslate endpoint and the result caps
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("WORDNIK_API_KEY") {
            self.wordnik.api_key = key;
        }
        if let Some(url) = lookup("LIBRETRANSLATE_URL") {
            self.libretranslate.api_url = url;
        }
        if let Some(key) = lookup("LIBRETRANSLATE_API_KEY") {
            self.libretranslate.api_key = key;
        }
        if let Some(cap) = lookup("QAMUS_DEFINITION_CAP").and_then(|v| v.parse().ok()) {
            self.definition_cap = cap;
        }
        if let Some(cap) = lookup("QAMUS_PHRASE_CAP").and_then(|v| v.parse().ok()) {
            self.phrase_cap = cap;
        }
    }
}
