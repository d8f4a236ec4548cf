use std::path::Path;

use qamus_core::{LoadError, LocalIndex};
use qamus_types::{TranslationGroup, WordEntry};
use serde_json::{Map, Value};

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load the embedded word list
    pub fn load_embedded() -> Result<LocalIndex, LoadError> {
        let json = include_str!("../data/dictionary.json");
        tracing::info!("Loading embedded word list...");
        let index = Self::from_json(json)?;
        tracing::info!("Loaded {} word-list entries", index.len());
        Ok(index)
    }

    /// Load a word list from file path
    pub fn load_from_file(path: &Path) -> Result<LocalIndex, LoadError> {
        tracing::info!("Loading word list from file: {}", path.display());
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        let index = Self::from_json(&json)?;
        tracing::info!("Loaded {} entries from file", index.len());
        Ok(index)
    }

    /// Parse a `{ key: entry }` object, keeping file order.
    ///
    /// Entries that fail validation are skipped with a warning.
    pub fn from_json(json: &str) -> Result<LocalIndex, LoadError> {
        let data: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

        let mut entries = Vec::with_capacity(data.len());
        for (key, value) in data {
            match Self::parse_entry(&key, value) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("Skipping word-list entry: {}", e),
            }
        }

        Ok(LocalIndex::new(entries))
    }

    fn parse_entry(key: &str, value: Value) -> Result<WordEntry, LoadError> {
        let mut entry: WordEntry =
            serde_json::from_value(value).map_err(|e| LoadError::InvalidEntry {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if entry.word.trim().is_empty() {
            return Err(LoadError::InvalidEntry {
                key: key.to_string(),
                reason: "empty headword".to_string(),
            });
        }

        // Groups must carry at least one non-empty meaning
        let groups = std::mem::take(&mut entry.translations);
        for TranslationGroup { kind, meanings } in groups {
            entry.push_translation(TranslationGroup::new(kind, meanings));
        }

        let mut synonyms = Vec::new();
        for synonym in std::mem::take(&mut entry.synonyms) {
            if !synonyms.contains(&synonym) && !synonym.trim().is_empty() {
                synonyms.push(synonym);
            }
        }
        entry.synonyms = synonyms;

        Ok(entry)
    }

    /// Embedded list plus additional files. Never fails: load errors fall back
    /// to whatever could be loaded, down to an empty index.
    pub fn load_with_additional(use_embedded: bool, additional_paths: &[String]) -> LocalIndex {
        let mut index = if use_embedded {
            Self::load_embedded().unwrap_or_else(|e| {
                tracing::error!("Failed to load embedded word list: {}", e);
                tracing::warn!("Starting with empty word list");
                LocalIndex::empty()
            })
        } else {
            tracing::warn!("Embedded word list disabled");
            LocalIndex::empty()
        };

        for path in additional_paths {
            match Self::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional word list from: {}", path);
                    index = index.merge(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load word list from {}: {}", path, e);
                }
            }
        }

        index
    }
}
