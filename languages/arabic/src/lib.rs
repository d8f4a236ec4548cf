pub mod free_dictionary;
pub mod glosbe;
pub mod loader;
pub mod sources;
pub mod translator;
pub mod transliterate;
pub mod wordnik;

pub use free_dictionary::FreeDictionary;
pub use glosbe::Glosbe;
pub use loader::DictionaryLoader;
pub use sources::Sources;
pub use translator::LibreTranslator;
pub use transliterate::{Transliterator, transliterate};
pub use wordnik::Wordnik;
