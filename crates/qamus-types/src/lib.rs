pub mod types;

pub use types::{
    AppEvent, Direction, EntryKey, Language, SearchOutcome, TextSource, TranslationGroup,
    WordEntry,
};
