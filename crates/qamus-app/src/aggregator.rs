use std::any::Any;
use std::collections::HashSet;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::FutureExt;
use qamus_core::gate::{UNCERTAIN_LABEL, UNCERTAIN_MARKER};
use qamus_core::{LocalIndex, ResultCache, Script, assess, detect_script};
use qamus_lang_arabic::{Sources, transliterate};
use qamus_sources::{SourceAdapter, Translation, Translator};
use qamus_types::{
    Direction, EntryKey, Language, SearchOutcome, TranslationGroup, WordEntry,
};

/// Combines the local word list with remote providers for one query at a time.
///
/// Holds no per-query state; the cache is the only thing shared between
/// overlapping searches.
pub struct Aggregator {
    index: Arc<LocalIndex>,
    cache: Arc<ResultCache>,
    /// Definition providers in priority order
    definitions: Vec<Arc<dyn SourceAdapter>>,
    phrases: Option<Arc<dyn SourceAdapter>>,
    translator: Option<Arc<dyn Translator>>,
    adapter_timeout: Duration,
    degraded: AtomicU64,
}

impl Aggregator {
    pub fn new(index: Arc<LocalIndex>, cache: Arc<ResultCache>) -> Self {
        Self {
            index,
            cache,
            definitions: Vec::new(),
            phrases: None,
            translator: None,
            adapter_timeout: Duration::from_secs(8),
            degraded: AtomicU64::new(0),
        }
    }

    pub fn with_sources(self, sources: Sources) -> Self {
        let Sources {
            definitions,
            phrases,
            translator,
        } = sources;
        Self {
            definitions,
            phrases,
            translator,
            ..self
        }
    }

    pub fn with_definitions(mut self, definitions: Vec<Arc<dyn SourceAdapter>>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn with_phrases(mut self, phrases: Arc<dyn SourceAdapter>) -> Self {
        self.phrases = Some(phrases);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    pub fn index(&self) -> &LocalIndex {
        &self.index
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Number of searches that fell back to local-only results
    pub fn degraded_count(&self) -> u64 {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Run one query. Never fails; provider trouble only shrinks the result list.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Empty query");
            return SearchOutcome::EmptyQuery;
        }

        let script = detect_script(query);
        let local: Vec<WordEntry> = self.index.lookup(query).cloned().collect();
        tracing::debug!("{} local matches for '{}' ({:?})", local.len(), query, script);

        let remote = match AssertUnwindSafe(self.fetch_remote(query, script))
            .catch_unwind()
            .await
        {
            Ok(remote) => remote,
            Err(panic) => {
                self.degraded.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    "Remote lookup for '{}' aborted, returning local results only: {}",
                    query,
                    panic_message(&*panic)
                );
                Vec::new()
            }
        };

        SearchOutcome::Results(merge_results(local, remote))
    }

    async fn fetch_remote(&self, query: &str, script: Script) -> Vec<WordEntry> {
        match script.direction() {
            Direction::EnglishToArabic => self.english_to_arabic(query).await,
            Direction::ArabicToEnglish => self.arabic_to_english(query).await,
        }
    }

    /// Definition and Arabic translation fetched side by side
    async fn english_to_arabic(&self, query: &str) -> Vec<WordEntry> {
        let direction = Direction::EnglishToArabic;
        let (definition, translation) =
            tokio::join!(self.define(query), self.machine_translate(query, direction));

        let entry = match (definition, translation) {
            (Some(mut entry), translation) => {
                if let Some(translation) = translation {
                    entry.push_translation(TranslationGroup::new(
                        direction.translation_label(),
                        vec![translation.text],
                    ));
                }
                entry
            }
            (None, Some(translation)) => translated_entry(query, direction, translation),
            (None, None) => return Vec::new(),
        };

        vec![entry]
    }

    /// Translation first, then the English definition of the translation
    async fn arabic_to_english(&self, query: &str) -> Vec<WordEntry> {
        let direction = Direction::ArabicToEnglish;

        let mut entry = match self.phrase_lookup(query, direction).await {
            Some(entry) => entry,
            None => match self.machine_translate(query, direction).await {
                Some(translation) => translated_entry(query, direction, translation),
                None => return Vec::new(),
            },
        };

        let Some(primary) = entry
            .translations
            .first()
            .and_then(|group| group.meanings.first())
            .cloned()
        else {
            return Vec::new();
        };

        entry.word = query.to_string();
        entry.language = Language::Arabic;
        entry.pronunciation = transliterate(query);

        let assessment = assess(query, &primary);
        if assessment.is_uncertain() {
            tracing::debug!("Translation '{}' of '{}' is uncertain", primary, query);
            mark_uncertain(&mut entry);
            return vec![entry];
        }

        let mut results = vec![entry];
        if let Some(definition) = self.define(&primary).await {
            results.push(definition);
        }
        results
    }

    /// Definition providers in order, first non-empty answer wins
    async fn define(&self, term: &str) -> Option<WordEntry> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        if let Some(hit) = self.cache.get(term) {
            tracing::debug!("Cache hit for '{}'", term);
            return Some(hit);
        }

        for adapter in &self.definitions {
            let name = adapter.metadata().name;
            let fetched = self
                .bounded(&name, adapter.fetch(term, Direction::EnglishToArabic))
                .await;

            match fetched {
                Some(entry) if !entry.translations.is_empty() => {
                    tracing::debug!("{} answered for '{}'", name, term);
                    self.cache.put(term, entry.clone());
                    return Some(entry);
                }
                _ => tracing::debug!("{} had nothing for '{}'", name, term),
            }
        }

        None
    }

    async fn phrase_lookup(&self, term: &str, direction: Direction) -> Option<WordEntry> {
        let adapter = self.phrases.as_ref()?;
        let name = adapter.metadata().name;
        self.bounded(&name, adapter.fetch(term, direction))
            .await
            .filter(|entry| !entry.translations.is_empty())
    }

    async fn machine_translate(
        &self,
        text: &str,
        direction: Direction,
    ) -> Option<Translation> {
        let translator = self.translator.as_ref()?;
        let name = translator.metadata().name;
        self.bounded(&name, translator.translate_text(text, direction))
            .await
    }

    async fn bounded<T>(&self, provider: &str, call: impl Future<Output = Option<T>>) -> Option<T> {
        match tokio::time::timeout(self.adapter_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "{} timed out after {:?}",
                    provider,
                    self.adapter_timeout
                );
                None
            }
        }
    }
}

/// Minimal entry wrapping a bare machine translation
fn translated_entry(word: &str, direction: Direction, translation: Translation) -> WordEntry {
    let mut entry = WordEntry::new(word, direction.source()).with_source(translation.provider);
    entry.push_translation(TranslationGroup::new(
        direction.translation_label(),
        vec![translation.text],
    ));
    entry
}

/// Relabel the translation group and mark its meanings
fn mark_uncertain(entry: &mut WordEntry) {
    if let Some(group) = entry.translations.first_mut() {
        group.kind = UNCERTAIN_LABEL.to_string();
        for meaning in &mut group.meanings {
            meaning.push_str(UNCERTAIN_MARKER);
        }
    }
}

/// Local entries first, then remote entries whose identity key is new
pub fn merge_results(local: Vec<WordEntry>, remote: Vec<WordEntry>) -> Vec<WordEntry> {
    let mut seen: HashSet<EntryKey> = local.iter().map(WordEntry::key).collect();
    let mut merged = local;

    for entry in remote {
        if seen.insert(entry.key()) {
            merged.push(entry);
        } else {
            tracing::debug!("Dropping duplicate {} entry '{}'", entry.language, entry.word);
        }
    }

    merged
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
