pub mod cache;
pub mod dictionary;
pub mod gate;
pub mod preprocess;
pub mod script;

pub use cache::ResultCache;
pub use dictionary::{LoadError, LocalIndex, MatchReason};
pub use gate::{Assessment, assess};
pub use preprocess::{DefaultPreprocessor, Preprocessor};
pub use script::{Script, detect_script, is_right_to_left_script};
