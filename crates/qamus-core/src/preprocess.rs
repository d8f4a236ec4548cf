use unicode_normalization::UnicodeNormalization;

const TATWEEL: char = '\u{0640}';

pub trait Preprocessor {
    // Default query cleanup before it reaches the aggregator
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFKC also folds Arabic presentation forms into base letters
        let text: String = text.nfkc().filter(|c| *c != TATWEEL).collect();

        // Collapse newlines and runs of spaces
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
