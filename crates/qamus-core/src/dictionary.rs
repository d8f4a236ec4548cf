use std::collections::{HashMap, HashSet};

use qamus_types::{EntryKey, Language, WordEntry};

use crate::script::{Script, detect_script, script_contains};

/// Why an entry matched a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    Headword,
    Meaning,
    Synonym,
}

/// Immutable in-memory word list with substring lookup
#[derive(Debug, Clone, Default)]
pub struct LocalIndex {
    entries: Vec<WordEntry>,
    key_index: HashMap<EntryKey, usize>,
}

impl LocalIndex {
    /// Build an index, keeping the first entry for each `(word, language)`
    pub fn new(entries: Vec<WordEntry>) -> Self {
        let mut index = Self::empty();
        for entry in entries {
            index.insert_if_absent(entry);
        }
        index
    }

    /// Index used when the word list could not be loaded
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            key_index: HashMap::new(),
        }
    }

    fn insert_if_absent(&mut self, entry: WordEntry) -> bool {
        let key = entry.key();
        if self.key_index.contains_key(&key) {
            return false;
        }
        self.key_index.insert(key, self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Merge another index into this one. Existing keys are never overridden.
    pub fn merge(mut self, other: LocalIndex) -> Self {
        let mut added = 0usize;
        for entry in other.entries {
            if self.insert_if_absent(entry) {
                added += 1;
            }
        }
        tracing::debug!("Merged {} new entries into local index", added);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, word: &str, language: Language) -> Option<&WordEntry> {
        let key = EntryKey {
            word: word.to_string(),
            language,
        };
        self.key_index
            .get(&key)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Entries matching `query` by headword, meaning or synonym, in storage order.
    ///
    /// The iterator is lazy; call again to restart. Blank queries yield nothing.
    pub fn lookup<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a WordEntry> + 'a {
        let query = query.trim();
        let script = detect_script(query);
        let mut seen: HashSet<EntryKey> = HashSet::new();

        self.entries
            .iter()
            .filter(move |entry| !query.is_empty() && match_reason(entry, query, script).is_some())
            .filter(move |entry| seen.insert(entry.key()))
    }
}

/// First criterion that makes `entry` match, checked headword, meanings, synonyms
pub fn match_reason(entry: &WordEntry, query: &str, script: Script) -> Option<MatchReason> {
    if script_contains(&entry.word, query, script) {
        return Some(MatchReason::Headword);
    }

    let in_meanings = entry
        .translations
        .iter()
        .flat_map(|group| group.meanings.iter())
        .any(|meaning| script_contains(meaning, query, script));
    if in_meanings {
        return Some(MatchReason::Meaning);
    }

    if entry
        .synonyms
        .iter()
        .any(|synonym| script_contains(synonym, query, script))
    {
        return Some(MatchReason::Synonym);
    }

    None
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid entry {key}: {reason}")]
    InvalidEntry { key: String, reason: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
