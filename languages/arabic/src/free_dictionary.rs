use async_trait::async_trait;
use qamus_sources::{ProviderMetadata, SourceAdapter, SourceError, check_status};
use qamus_types::{Direction, Language, TranslationGroup, WordEntry};
use serde::Deserialize;

pub const FREE_DICTIONARY: &str = "FreeDictionary";

// Response shape of api.dictionaryapi.dev
#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    definition: String,
    #[serde(default)]
    synonyms: Vec<String>,
}

/// English definitions from the Free Dictionary API
#[derive(Clone)]
pub struct FreeDictionary {
    client: reqwest::Client,
    api_url: String,
    definition_cap: usize,
}

impl FreeDictionary {
    pub fn new(client: reqwest::Client, api_url: String, definition_cap: usize) -> Self {
        Self {
            client,
            api_url,
            definition_cap,
        }
    }

    /// Normalize the first entry of a response body
    pub fn parse(body: &str, definition_cap: usize) -> Result<Option<WordEntry>, SourceError> {
        let entries: Vec<ApiEntry> = serde_json::from_str(body)?;
        Ok(entries
            .into_iter()
            .next()
            .and_then(|entry| normalize(entry, definition_cap)))
    }
}

fn normalize(entry: ApiEntry, definition_cap: usize) -> Option<WordEntry> {
    let mut word = WordEntry::new(entry.word, Language::English).with_source(FREE_DICTIONARY);

    word.pronunciation = entry
        .phonetics
        .iter()
        .filter_map(|p| p.text.as_deref())
        .find(|text| !text.trim().is_empty())
        .unwrap_or_default()
        .to_string();

    let mut groups: Vec<TranslationGroup> = Vec::new();
    for meaning in entry.meanings {
        for definition in meaning.definitions {
            for synonym in &definition.synonyms {
                word.push_synonym(synonym.as_str());
            }

            let text = definition.definition.trim();
            if text.is_empty() {
                continue;
            }
            push_capped(&mut groups, &meaning.part_of_speech, text, definition_cap);
        }
    }

    for group in groups {
        word.push_translation(group);
    }

    if word.translations.is_empty() {
        return None;
    }
    Some(word)
}

/// Add `text` under `kind`, merging repeated parts of speech and keeping at most `cap`
pub(crate) fn push_capped(groups: &mut Vec<TranslationGroup>, kind: &str, text: &str, cap: usize) {
    match groups.iter_mut().find(|g| g.kind == kind) {
        Some(group) => {
            if group.meanings.len() < cap {
                group.meanings.push(text.to_string());
            }
        }
        None if cap > 0 => groups.push(TranslationGroup::new(kind, vec![text.to_string()])),
        None => {}
    }
}

#[async_trait]
impl SourceAdapter for FreeDictionary {
    async fn try_fetch(
        &self,
        term: &str,
        _direction: Direction,
    ) -> Result<Option<WordEntry>, SourceError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let mut url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| SourceError::Malformed(format!("bad endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Malformed("endpoint cannot take a path".to_string()))?
            .pop_if_empty()
            .push(term);

        let response = self.client.get(url).send().await?;
        let Some(response) = check_status(response)? else {
            tracing::debug!("No {} entry for '{}'", FREE_DICTIONARY, term);
            return Ok(None);
        };

        let body = response.text().await?;
        Self::parse(&body, self.definition_cap)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: FREE_DICTIONARY.to_string(),
        }
    }
}
