use async_trait::async_trait;
use qamus_sources::{ProviderMetadata, SourceError, Translation, Translator, check_status};
use qamus_types::Direction;
use serde::{Deserialize, Serialize};

pub const LIBRE_TRANSLATE: &str = "LibreTranslate";

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// Machine translation through a LibreTranslate instance
#[derive(Clone)]
pub struct LibreTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl LibreTranslator {
    pub fn new(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }

    pub fn parse(body: &str) -> Result<String, SourceError> {
        let response: TranslateResponse = serde_json::from_str(body)?;
        if let Some(error) = response.error {
            return Err(SourceError::Malformed(error));
        }
        response
            .translated_text
            .map(|text| text.trim().to_string())
            .ok_or_else(|| SourceError::Malformed("No translation in response".to_string()))
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        direction: Direction,
    ) -> Result<Translation, SourceError> {
        let request = TranslateRequest {
            q: text,
            source: direction.source().code(),
            target: direction.target().code(),
            format: "text",
            api_key: (!self.api_key.is_empty()).then_some(self.api_key.as_str()),
        };

        let response = self.client.post(&self.api_url).json(&request).send().await?;

        let Some(response) = check_status(response)? else {
            return Err(SourceError::Status(404));
        };

        let body = response.text().await?;
        let translated = Self::parse(&body)?;

        Ok(Translation {
            text: translated,
            provider: LIBRE_TRANSLATE.to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: LIBRE_TRANSLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translated_text() {
        let text = LibreTranslator::parse(r#"{ "translatedText": " كتاب " }"#).unwrap();
        assert_eq!(text, "كتاب");
    }

    #[test]
    fn test_parse_error_body() {
        let err = LibreTranslator::parse(r#"{ "error": "Visit portal to get an API key" }"#);
        assert!(matches!(err, Err(SourceError::Malformed(_))));
        assert!(LibreTranslator::parse("{}").is_err());
    }

    #[test]
    fn test_request_omits_empty_key() {
        let request = TranslateRequest {
            q: "book",
            source: "en",
            target: "ar",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["q"], "book");
        assert!(json.get("api_key").is_none());
    }
}
