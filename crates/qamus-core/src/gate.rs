//! Heuristics for machine translations that are probably wrong.
//!
//! Free translation endpoints tend to collapse unknown Arabic words into
//! "hi", "no" or "a". These checks catch the common cases; false positives and
//! negatives are expected.

/// Short translations known to be right
const KNOWN_SHORT_TRANSLATIONS: &[(&str, &str)] = &[
    ("لا", "no"),
    ("في", "in"),
    ("أنا", "I"),
    ("انا", "I"),
    ("هو", "he"),
    ("أو", "or"),
    ("او", "or"),
    ("يا", "O"),
    ("إلى", "to"),
    ("الى", "to"),
    ("على", "on"),
    ("من", "of"),
    ("نحن", "we"),
    ("ب", "by"),
    ("مرحبا", "hi"),
    ("أهلا", "hi"),
    ("اهلا", "hi"),
    ("هلا", "hi"),
    ("هاي", "hi"),
];

/// Source words for which "hi" is a fair translation
const GREETINGS: &[&str] = &["مرحبا", "أهلا", "اهلا", "هلا", "هاي", "السلام", "سلام"];

pub const UNCERTAIN_LABEL: &str = "Uncertain translation";
pub const UNCERTAIN_MARKER: &str = " (?)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Accept,
    Uncertain,
}

impl Assessment {
    pub fn is_uncertain(&self) -> bool {
        matches!(self, Assessment::Uncertain)
    }
}

fn is_known_short(source: &str, candidate: &str) -> bool {
    KNOWN_SHORT_TRANSLATIONS
        .iter()
        .any(|(src, dst)| *src == source && dst.eq_ignore_ascii_case(candidate))
}

fn is_greeting(source: &str) -> bool {
    GREETINGS.iter().any(|greeting| source.contains(greeting))
}

/// Decide whether `candidate` should be shown as a trusted translation of `source`
pub fn assess(source: &str, candidate: &str) -> Assessment {
    let source = source.trim();
    let candidate = candidate.trim();

    if is_known_short(source, candidate) {
        return Assessment::Accept;
    }

    let source_len = source.chars().count();
    let uncertain = candidate.chars().count() <= 2
        || (candidate.eq_ignore_ascii_case("hi") && !is_greeting(source))
        || (candidate.eq_ignore_ascii_case("no") && source_len > 3)
        || (candidate.eq_ignore_ascii_case("a") && source_len > 2);

    if uncertain {
        tracing::debug!("Flagged translation '{}' of '{}' as uncertain", candidate, source);
        Assessment::Uncertain
    } else {
        Assessment::Accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_for_long_source_is_uncertain() {
        assert_eq!(assess("مدرسة", "no"), Assessment::Uncertain);
        assert_eq!(assess("مدرسة", "No"), Assessment::Uncertain);
    }

    #[test]
    fn test_known_negation_is_accepted() {
        assert_eq!(assess("لا", "no"), Assessment::Accept);
        assert_eq!(assess(" لا ", "No"), Assessment::Accept);
    }

    #[test]
    fn test_short_translation_is_uncertain_unless_listed() {
        assert_eq!(assess("قلم", "ok"), Assessment::Uncertain);
        assert_eq!(assess("في", "in"), Assessment::Accept);
    }

    #[test]
    fn test_hi_only_for_greetings() {
        assert_eq!(assess("مرحبا", "hi"), Assessment::Accept);
        assert_eq!(assess("مدرسة", "Hi"), Assessment::Uncertain);
        // greeting inside a phrase is not on the short list, so length still flags it
        assert_eq!(assess("مرحبا يا صديقي", "hi"), Assessment::Uncertain);
    }

    #[test]
    fn test_normal_translation_is_accepted() {
        assert_eq!(assess("كتاب", "book"), Assessment::Accept);
        assert_eq!(assess("مرحبا بكم", "welcome"), Assessment::Accept);
        assert!(!assess("ماء", "water").is_uncertain());
    }
}
