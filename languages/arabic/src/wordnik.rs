use async_trait::async_trait;
use qamus_sources::{ProviderMetadata, SourceAdapter, SourceError, check_status};
use qamus_types::{Direction, Language, TranslationGroup, WordEntry};
use serde::Deserialize;

use crate::free_dictionary::push_capped;

pub const WORDNIK: &str = "Wordnik";

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    #[serde(default)]
    word: Option<String>,
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "relatedWords", default)]
    related_words: Vec<RelatedWords>,
}

#[derive(Debug, Deserialize)]
struct RelatedWords {
    #[serde(rename = "relationshipType", default)]
    relationship_type: String,
    #[serde(default)]
    words: Vec<String>,
}

/// English definitions from the Wordnik API
#[derive(Clone)]
pub struct Wordnik {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    definition_cap: usize,
}

impl Wordnik {
    pub fn new(
        client: reqwest::Client,
        api_url: String,
        api_key: String,
        definition_cap: usize,
    ) -> Self {
        Self {
            client,
            api_url,
            api_key,
            definition_cap,
        }
    }

    /// Normalize a definitions response for `term`
    pub fn parse(
        body: &str,
        term: &str,
        definition_cap: usize,
    ) -> Result<Option<WordEntry>, SourceError> {
        let definitions: Vec<ApiDefinition> = serde_json::from_str(body)?;
        Ok(normalize(definitions, term, definition_cap))
    }
}

/// Drop inline markup such as `<xref>` and `<em>`
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize(definitions: Vec<ApiDefinition>, term: &str, definition_cap: usize) -> Option<WordEntry> {
    let headword = definitions
        .iter()
        .find_map(|d| d.word.clone())
        .unwrap_or_else(|| term.to_string());
    let mut word = WordEntry::new(headword, Language::English).with_source(WORDNIK);

    let mut groups: Vec<TranslationGroup> = Vec::new();
    for definition in definitions {
        for related in &definition.related_words {
            if related.relationship_type == "synonym" {
                for synonym in &related.words {
                    word.push_synonym(synonym.as_str());
                }
            }
        }

        let Some(text) = definition.text.as_deref().map(strip_markup) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        let kind = definition.part_of_speech.as_deref().unwrap_or("definition");
        push_capped(&mut groups, kind, &text, definition_cap);
    }

    for group in groups {
        word.push_translation(group);
    }

    if word.translations.is_empty() {
        return None;
    }
    Some(word)
}

#[async_trait]
impl SourceAdapter for Wordnik {
    async fn try_fetch(
        &self,
        term: &str,
        _direction: Direction,
    ) -> Result<Option<WordEntry>, SourceError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        if self.api_key.is_empty() {
            tracing::debug!("{} skipped, no API key configured", WORDNIK);
            return Ok(None);
        }

        let mut url = reqwest::Url::parse(&self.api_url)
            .map_err(|e| SourceError::Malformed(format!("bad endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::Malformed("endpoint cannot take a path".to_string()))?
            .pop_if_empty()
            .push(term)
            .push("definitions");

        let response = self
            .client
            .get(url)
            .query(&[
                ("limit", "50"),
                ("includeRelated", "true"),
                ("useCanonical", "false"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let Some(response) = check_status(response)? else {
            tracing::debug!("No {} entry for '{}'", WORDNIK, term);
            return Ok(None);
        };

        let body = response.text().await?;
        Self::parse(&body, term, self.definition_cap)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: WORDNIK.to_string(),
        }
    }
}
