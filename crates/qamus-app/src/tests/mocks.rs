use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use qamus_sources::{ProviderMetadata, SourceAdapter, SourceError, Translation, Translator};
use qamus_types::{Direction, Language, TranslationGroup, WordEntry};

pub enum Behavior {
    Answer(Option<WordEntry>),
    Fail,
    Panic,
    Stall(Duration),
}

pub struct MockAdapter {
    pub name: &'static str,
    pub behavior: Behavior,
    pub calls: AtomicUsize,
    pub terms: std::sync::Mutex<Vec<String>>,
}

impl MockAdapter {
    pub fn new(name: &'static str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name,
            behavior,
            calls: AtomicUsize::new(0),
            terms: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub fn answering(name: &'static str, entry: WordEntry) -> Arc<Self> {
        Self::new(name, Behavior::Answer(Some(entry)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceAdapter for MockAdapter {
    async fn try_fetch(
        &self,
        term: &str,
        _direction: Direction,
    ) -> Result<Option<WordEntry>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.terms.lock().unwrap().push(term.to_string());

        match &self.behavior {
            Behavior::Answer(entry) => Ok(entry.clone()),
            Behavior::Fail => Err(SourceError::Status(503)),
            Behavior::Panic => panic!("{} blew up", self.name),
            Behavior::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(None)
            }
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.name.to_string(),
        }
    }
}

pub struct MockTranslator {
    pub reply: Option<String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl MockTranslator {
    fn build(reply: Option<&str>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.map(str::to_string),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::build(Some(text), Duration::ZERO)
    }

    /// Answers `text` after `delay`
    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Self::build(Some(text), delay)
    }

    pub fn failing() -> Arc<Self> {
        Self::build(None, Duration::ZERO)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        _text: &str,
        _direction: Direction,
    ) -> Result<Translation, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Some(text) => Ok(Translation {
                text: text.clone(),
                provider: "MockMT".to_string(),
            }),
            None => Err(SourceError::Timeout),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MockMT".to_string(),
        }
    }
}

/// English entry with one group per `(part of speech, meaning)`
pub fn english(word: &str, source: &str, groups: &[(&str, &str)]) -> WordEntry {
    let mut entry = WordEntry::new(word, Language::English).with_source(source);
    for (kind, meaning) in groups {
        entry.push_translation(TranslationGroup::new(*kind, vec![meaning.to_string()]));
    }
    entry
}

/// Phrase lookup answer for an Arabic term
pub fn phrases(term: &str, found: &[&str]) -> WordEntry {
    let mut entry = WordEntry::new(term, Language::Arabic).with_source("MockPhrases");
    entry.push_translation(TranslationGroup::new(
        Direction::ArabicToEnglish.translation_label(),
        found.iter().map(|p| p.to_string()).collect(),
    ));
    entry
}
