use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Interactive query, supersedes the one still running
    TextInput(String),
    /// Batch query, answered after every earlier one
    RawTextInput {
        text: String,
        source: TextSource,
    },
    /// Empty query, presenter should show the prompt
    ShowWelcome,
    ShowResults {
        query: String,
        results: Vec<WordEntry>,
    },
    NoResults {
        query: String,
    },
    Shutdown,
}

/// Where a batch query came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Argument,
    Stdin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Arabic,
}

impl Language {
    /// ISO 639-1 code used by translation providers
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// ISO 639-3 code used by phrase-lookup providers
    pub fn code3(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Arabic => "ara",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation direction of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    EnglishToArabic,
    ArabicToEnglish,
}

impl Direction {
    pub fn source(&self) -> Language {
        match self {
            Direction::EnglishToArabic => Language::English,
            Direction::ArabicToEnglish => Language::Arabic,
        }
    }

    pub fn target(&self) -> Language {
        match self {
            Direction::EnglishToArabic => Language::Arabic,
            Direction::ArabicToEnglish => Language::English,
        }
    }

    /// Group label for a translation into the target language
    pub fn translation_label(&self) -> String {
        format!("{} translation", self.target())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationGroup {
    #[serde(rename = "type")]
    pub kind: String,
    pub meanings: Vec<String>,
}

impl TranslationGroup {
    pub fn new(kind: impl Into<String>, meanings: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            meanings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub language: Language,
    #[serde(default)]
    pub translations: Vec<TranslationGroup>,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Provenance tag, `None` for offline entries
    #[serde(default, rename = "sourceLabel", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub audio: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, language: Language) -> Self {
        Self {
            word: word.into(),
            language,
            translations: Vec::new(),
            pronunciation: String::new(),
            synonyms: Vec::new(),
            source: None,
            audio: String::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            word: self.word.clone(),
            language: self.language,
        }
    }

    pub fn is_local(&self) -> bool {
        self.source.is_none()
    }

    /// Append a group, skipping it if it carries no usable meaning
    pub fn push_translation(&mut self, group: TranslationGroup) {
        let meanings: Vec<String> = group
            .meanings
            .into_iter()
            .filter(|m| !m.trim().is_empty())
            .collect();
        if !meanings.is_empty() {
            self.translations.push(TranslationGroup {
                kind: group.kind,
                meanings,
            });
        }
    }

    /// Add a synonym unless it is already present
    pub fn push_synonym(&mut self, synonym: impl Into<String>) {
        let synonym = synonym.into();
        if !synonym.trim().is_empty() && !self.synonyms.contains(&synonym) {
            self.synonyms.push(synonym);
        }
    }
}

/// Identity of an entry for deduplication
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub word: String,
    pub language: Language,
}

/// What a search produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query, nothing was searched
    EmptyQuery,
    Results(Vec<WordEntry>),
}

impl SearchOutcome {
    pub fn entries(&self) -> &[WordEntry] {
        match self {
            SearchOutcome::EmptyQuery => &[],
            SearchOutcome::Results(entries) => entries,
        }
    }

    pub fn into_entries(self) -> Vec<WordEntry> {
        match self {
            SearchOutcome::EmptyQuery => Vec::new(),
            SearchOutcome::Results(entries) => entries,
        }
    }

    pub fn is_empty_query(&self) -> bool {
        matches!(self, SearchOutcome::EmptyQuery)
    }
}
