use qamus_types::{Direction, WordEntry};

/// Dictionary or phrase-lookup provider
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Look `term` up and normalize the response.
    ///
    /// `Ok(None)` means the provider answered but had nothing for `term`.
    async fn try_fetch(
        &self,
        term: &str,
        direction: Direction,
    ) -> Result<Option<WordEntry>, SourceError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;

    /// Fail-soft lookup: every error is logged and reported as absent
    async fn fetch(&self, term: &str, direction: Direction) -> Option<WordEntry> {
        match self.try_fetch(term, direction).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("{} lookup for '{}' failed: {}", self.metadata().name, term, e);
                None
            }
        }
    }
}

/// Machine translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text in the given direction
    async fn translate(&self, text: &str, direction: Direction)
    -> Result<Translation, SourceError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;

    /// Fail-soft translation, blank results count as absent
    async fn translate_text(&self, text: &str, direction: Direction) -> Option<Translation> {
        match self.translate(text, direction).await {
            Ok(translation) if !translation.text.trim().is_empty() => Some(translation),
            Ok(_) => {
                tracing::debug!("{} returned an empty translation", self.metadata().name);
                None
            }
            Err(e) => {
                tracing::warn!("{} translation of '{}' failed: {}", self.metadata().name, text, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    /// Name of the provider that produced `text`
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Timed out")]
    Timeout,
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Malformed(e.to_string())
    }
}

/// Map provider status codes onto [`SourceError`]; 404 means "no entry".
///
/// Returns `Ok(None)` for 404 so callers can report absence without logging a
/// failure.
pub fn check_status(
    response: reqwest::Response,
) -> Result<Option<reqwest::Response>, SourceError> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimitExceeded);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SourceError::AuthenticationError);
    }

    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    Ok(Some(response))
}
