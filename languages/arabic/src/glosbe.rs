use async_trait::async_trait;
use qamus_sources::{ProviderMetadata, SourceAdapter, SourceError, check_status};
use qamus_types::{Direction, TranslationGroup, WordEntry};
use serde::Deserialize;

pub const GLOSBE: &str = "Glosbe";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    result: String,
    #[serde(default)]
    tuc: Vec<Tuc>,
}

#[derive(Debug, Deserialize)]
struct Tuc {
    #[serde(default)]
    phrase: Option<Phrase>,
}

#[derive(Debug, Deserialize)]
struct Phrase {
    text: String,
}

/// Bilingual phrase lookup from Glosbe
#[derive(Clone)]
pub struct Glosbe {
    client: reqwest::Client,
    api_url: String,
    phrase_cap: usize,
}

impl Glosbe {
    pub fn new(client: reqwest::Client, api_url: String, phrase_cap: usize) -> Self {
        Self {
            client,
            api_url,
            phrase_cap,
        }
    }

    /// Normalize a translate response for `term`
    pub fn parse(
        body: &str,
        term: &str,
        direction: Direction,
        phrase_cap: usize,
    ) -> Result<Option<WordEntry>, SourceError> {
        let response: ApiResponse = serde_json::from_str(body)?;
        if response.result != "ok" {
            return Err(SourceError::Malformed(format!(
                "result '{}'",
                response.result
            )));
        }

        let mut phrases: Vec<String> = Vec::new();
        for text in response
            .tuc
            .into_iter()
            .filter_map(|tuc| tuc.phrase)
            .map(|phrase| phrase.text.trim().to_string())
        {
            if phrases.len() >= phrase_cap {
                break;
            }
            if !text.is_empty() && !phrases.contains(&text) {
                phrases.push(text);
            }
        }

        if phrases.is_empty() {
            return Ok(None);
        }

        let mut entry = WordEntry::new(term, direction.source()).with_source(GLOSBE);
        // alternate translations double as synonyms
        for alternate in phrases.iter().skip(1) {
            entry.push_synonym(alternate.as_str());
        }
        entry.push_translation(TranslationGroup::new(direction.translation_label(), phrases));

        Ok(Some(entry))
    }
}

#[async_trait]
impl SourceAdapter for Glosbe {
    async fn try_fetch(
        &self,
        term: &str,
        direction: Direction,
    ) -> Result<Option<WordEntry>, SourceError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("from", direction.source().code3()),
                ("dest", direction.target().code3()),
                ("format", "json"),
                ("phrase", term),
            ])
            .send()
            .await?;

        let Some(response) = check_status(response)? else {
            return Ok(None);
        };

        let body = response.text().await?;
        Self::parse(&body, term, direction, self.phrase_cap)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: GLOSBE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use qamus_types::Language;

    use super::*;

    fn body(phrases: &[&str]) -> String {
        let tuc: Vec<String> = phrases
            .iter()
            .map(|p| format!(r#"{{ "phrase": {{ "text": "{p}", "language": "en" }}, "meaningId": 1 }}"#))
            .collect();
        format!(
            r#"{{ "result": "ok", "tuc": [{}, {{ "meanings": [] }}], "phrase": "x", "from": "ara", "dest": "eng" }}"#,
            tuc.join(",")
        )
    }

    #[test]
    fn test_single_direction_labeled_group() {
        let json = body(&["book", "volume", "book", "tome"]);
        let entry = Glosbe::parse(&json, "كتاب", Direction::ArabicToEnglish, 8)
            .unwrap()
            .unwrap();

        assert_eq!(entry.word, "كتاب");
        assert_eq!(entry.language, Language::Arabic);
        assert_eq!(entry.translations.len(), 1);
        assert_eq!(entry.translations[0].kind, "English translation");
        assert_eq!(entry.translations[0].meanings, vec!["book", "volume", "tome"]);
        assert_eq!(entry.synonyms, vec!["volume", "tome"]);
    }

    #[test]
    fn test_phrase_cap() {
        let json = body(&["a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8", "a9", "a10"]);
        let entry = Glosbe::parse(&json, "x", Direction::EnglishToArabic, 8)
            .unwrap()
            .unwrap();
        assert_eq!(entry.translations[0].kind, "Arabic translation");
        assert_eq!(entry.translations[0].meanings.len(), 8);
        assert_eq!(entry.synonyms.len(), 7);
    }

    #[test]
    fn test_single_phrase_has_no_synonyms() {
        let json = body(&["water"]);
        let entry = Glosbe::parse(&json, "ماء", Direction::ArabicToEnglish, 8)
            .unwrap()
            .unwrap();
        assert!(entry.synonyms.is_empty());
    }

    #[test]
    fn test_no_phrases_or_bad_result() {
        let json = r#"{ "result": "ok", "tuc": [] }"#;
        assert!(Glosbe::parse(json, "x", Direction::ArabicToEnglish, 8).unwrap().is_none());

        let json = r#"{ "result": "error", "message": "Too many queries" }"#;
        assert!(Glosbe::parse(json, "x", Direction::ArabicToEnglish, 8).is_err());
    }
}
