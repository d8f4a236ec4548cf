use std::collections::HashMap;
use std::sync::LazyLock;

const TATWEEL: char = '\u{0640}';
const SHADDA: char = '\u{0651}';
const SUKUN: char = '\u{0652}';

static DEFAULT: LazyLock<Transliterator> = LazyLock::new(Transliterator::with_defaults);

/// Approximate Latin rendering of Arabic text using the default tables
pub fn transliterate(text: &str) -> String {
    DEFAULT.transliterate(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Consonant,
    Vowel,
    Other,
}

/// Arabic to Latin phonetic rendering
pub struct Transliterator {
    words: HashMap<String, String>,
}

impl Transliterator {
    /// Create with no whole-word table, per-letter rules only
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Create with common words and phrases
    pub fn with_defaults() -> Self {
        let mut words = HashMap::new();

        let common = [
            ("مرحبا", "marḥaban"),
            ("أهلا", "ahlan"),
            ("اهلا", "ahlan"),
            ("السلام عليكم", "as-salāmu ʿalaykum"),
            ("شكرا", "shukran"),
            ("نعم", "naʿam"),
            ("لا", "lā"),
            ("الله", "allāh"),
            ("كتاب", "kitāb"),
            ("ماء", "māʾ"),
            ("مياه", "miyāh"),
            ("بيت", "bayt"),
            ("منزل", "manzil"),
            ("حب", "ḥubb"),
            ("عائلة", "ʿāʾila"),
            ("أسرة", "usra"),
            ("صديق", "ṣadīq"),
            ("مدرسة", "madrasa"),
            ("طعام", "ṭaʿām"),
            ("عمل", "ʿamal"),
            ("وقت", "waqt"),
            ("جميل", "jamīl"),
            ("سعيد", "saʿīd"),
        ];

        for (word, latin) in common {
            words.insert(word.to_string(), latin.to_string());
        }

        Self { words }
    }

    pub fn transliterate(&self, text: &str) -> String {
        let key = strip_marks(text);
        if key.is_empty() {
            return String::new();
        }

        if let Some(latin) = self.words.get(&key) {
            return latin.clone();
        }

        text.split_whitespace()
            .map(|word| {
                self.words
                    .get(&strip_marks(word))
                    .cloned()
                    .unwrap_or_else(|| transliterate_letters(word))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove harakat and tatweel, normalize spacing
fn strip_marks(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !is_haraka(*c) && *c != TATWEEL)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_haraka(c: char) -> bool {
    ('\u{064B}'..='\u{0652}').contains(&c) || c == '\u{0670}'
}

fn consonant(c: char) -> Option<&'static str> {
    let latin = match c {
        'ب' => "b",
        'ت' => "t",
        'ث' => "th",
        'ج' => "j",
        'ح' => "ḥ",
        'خ' => "kh",
        'د' => "d",
        'ذ' => "dh",
        'ر' => "r",
        'ز' => "z",
        'س' => "s",
        'ش' => "sh",
        'ص' => "ṣ",
        'ض' => "ḍ",
        'ط' => "ṭ",
        'ظ' => "ẓ",
        'ع' => "ʿ",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ك' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'ه' => "h",
        'ء' | 'ؤ' | 'ئ' => "ʾ",
        'پ' => "p",
        'چ' => "ch",
        'ڤ' => "v",
        'گ' => "g",
        _ => return None,
    };
    Some(latin)
}

/// Per-letter fallback for a single word.
///
/// A hyphen separates two consonants when the first one does not follow a
/// vowel, which keeps unvoweled clusters readable ("k-tāb").
fn transliterate_letters(word: &str) -> String {
    let mut segments: Vec<(String, Class)> = Vec::new();

    for c in word.chars() {
        let prev = segments.last().map(|(_, class)| *class);
        let at_start = segments.is_empty();

        let (latin, class): (&str, Class) = match c {
            TATWEEL | SUKUN => continue,
            SHADDA => {
                if let Some((last, Class::Consonant)) = segments.last_mut() {
                    let doubled = last.trim_start_matches('-').to_string();
                    last.push_str(&doubled);
                }
                continue;
            }
            '\u{064E}' => ("a", Class::Vowel),
            '\u{0650}' => ("i", Class::Vowel),
            '\u{064F}' => ("u", Class::Vowel),
            '\u{064B}' => ("an", Class::Vowel),
            '\u{064D}' => ("in", Class::Vowel),
            '\u{064C}' => ("un", Class::Vowel),
            '\u{0670}' | 'ى' => ("ā", Class::Vowel),
            'ا' | 'ٱ' if at_start => ("a", Class::Vowel),
            'ا' => ("ā", Class::Vowel),
            'آ' => ("ʾā", Class::Vowel),
            'أ' if at_start => ("a", Class::Vowel),
            'إ' if at_start => ("i", Class::Vowel),
            'أ' | 'إ' => ("ʾ", Class::Consonant),
            'ة' => ("a", Class::Vowel),
            'و' if prev == Some(Class::Consonant) => ("ū", Class::Vowel),
            'و' => ("w", Class::Consonant),
            'ي' if prev == Some(Class::Consonant) => ("ī", Class::Vowel),
            'ي' => ("y", Class::Consonant),
            _ => match consonant(c) {
                Some(latin) => (latin, Class::Consonant),
                None => {
                    segments.push((c.to_string(), Class::Other));
                    continue;
                }
            },
        };

        let mut latin = latin.to_string();
        if class == Class::Consonant && prev == Some(Class::Consonant) {
            let before_prev = segments
                .len()
                .checked_sub(2)
                .map(|idx| segments[idx].1);
            if before_prev != Some(Class::Vowel) {
                latin.insert(0, '-');
            }
        }
        segments.push((latin, class));
    }

    segments.into_iter().map(|(latin, _)| latin).collect()
}
