use qamus_types::Direction;

/// Arabic, Arabic Supplement, Extended-A and Presentation Forms A/B
const ARABIC_RANGES: [(char, char); 5] = [
    ('\u{0600}', '\u{06FF}'),
    ('\u{0750}', '\u{077F}'),
    ('\u{08A0}', '\u{08FF}'),
    ('\u{FB50}', '\u{FDFF}'),
    ('\u{FE70}', '\u{FEFF}'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Arabic,
    Latin,
}

impl Script {
    pub fn direction(&self) -> Direction {
        match self {
            Script::Arabic => Direction::ArabicToEnglish,
            Script::Latin => Direction::EnglishToArabic,
        }
    }
}

pub fn is_arabic_char(c: char) -> bool {
    ARABIC_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

/// True if any char of `text` is in an Arabic block
pub fn is_right_to_left_script(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

pub fn detect_script(text: &str) -> Script {
    if is_right_to_left_script(text) {
        Script::Arabic
    } else {
        Script::Latin
    }
}

/// Substring test with the case rule of the needle's script.
///
/// Latin text is compared lower-cased, Arabic has no case and is compared by
/// codepoint.
pub fn script_contains(haystack: &str, needle: &str, script: Script) -> bool {
    match script {
        Script::Arabic => haystack.contains(needle),
        Script::Latin => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_core_arabic() {
        assert!(is_right_to_left_script("مرحبا"));
        assert!(is_right_to_left_script("book كتاب"));
        assert!(!is_right_to_left_script("book"));
        assert!(!is_right_to_left_script(""));
    }

    #[test]
    fn test_detects_supplement_and_presentation_forms() {
        // Arabic Supplement
        assert!(is_right_to_left_script("\u{0750}"));
        // Extended-A
        assert!(is_right_to_left_script("\u{08A0}"));
        // Presentation Forms-A
        assert!(is_right_to_left_script("\u{FDF2}"));
        // Presentation Forms-B, lam-alef ligature
        assert!(is_right_to_left_script("\u{FEFB}"));
        // Hebrew is right-to-left but not Arabic
        assert!(!is_right_to_left_script("שלום"));
    }

    #[test]
    fn test_script_direction() {
        assert_eq!(detect_script("ماء").direction(), Direction::ArabicToEnglish);
        assert_eq!(detect_script("water").direction(), Direction::EnglishToArabic);
    }

    #[test]
    fn test_script_contains_case_rules() {
        assert!(script_contains("Hello", "hel", Script::Latin));
        assert!(script_contains("hello", "HEL", Script::Latin));
        assert!(script_contains("السلام عليكم", "سلام", Script::Arabic));
        assert!(!script_contains("مرحبا", "كتاب", Script::Arabic));
    }
}
