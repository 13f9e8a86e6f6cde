// WHY: Centralized, immutable lexicon and pattern tables shared by every stage
// Tables are plain statics; stages compile them once into read-only sets and regexes at construction

use anyhow::Result;
use regex_automata::meta::Regex;
use std::collections::HashSet;

use crate::language::Language;

/// High-frequency English function words
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "be", "been", "to", "of",
    "in", "on", "at", "for", "with", "from", "by", "it", "this", "that", "these", "those", "he",
    "she", "they", "we", "you", "i", "my", "your", "his", "her", "our", "their", "its", "have",
    "has", "had", "do", "does", "did", "not", "no", "so", "if", "then", "there", "here", "what",
    "who", "when", "where", "why", "how", "can", "will", "would", "could", "should", "me", "him",
    "them", "us", "up", "out", "as", "all", "some",
];

/// High-frequency Spanish function words
pub const SPANISH_STOP_WORDS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "y", "o", "pero", "es", "son", "está",
    "están", "en", "de", "del", "al", "a", "que", "con", "por", "para", "se", "lo", "le", "les",
    "su", "sus", "mi", "mis", "tu", "tus", "yo", "tú", "él", "ella", "ellos", "ellas", "nosotros",
    "no", "sí", "muy", "más", "como", "cuando", "donde", "porque", "también", "hay", "este",
    "esta", "ese", "esa", "me", "te", "nos", "ya", "fue", "era", "sin", "sobre", "entre",
];

/// Everyday English vocabulary found in early-grade reading material
pub const ENGLISH_COMMON_WORDS: &[&str] = &[
    "cat", "dog", "sun", "run", "play", "plays", "played", "school", "book", "books", "read",
    "house", "home", "mom", "dad", "mother", "father", "friend", "friends", "happy", "little",
    "big", "water", "tree", "bird", "fish", "ball", "red", "blue", "green", "day", "night",
    "good", "like", "see", "look", "go", "went", "come", "eat", "food", "family", "teacher",
    "children", "kids", "boy", "girl", "sat", "said", "today", "fun", "park", "car", "bus",
];

/// Everyday Spanish vocabulary found in early-grade reading material
pub const SPANISH_COMMON_WORDS: &[&str] = &[
    "niño", "niña", "niños", "niñas", "casa", "escuela", "libro", "libros", "leer", "perro",
    "gato", "sol", "agua", "árbol", "pájaro", "pez", "mamá", "papá", "madre", "padre", "amigo",
    "amiga", "amigos", "feliz", "grande", "pequeño", "juega", "juegan", "jugar", "comer",
    "come", "comida", "familia", "maestra", "maestro", "día", "noche", "bueno", "buena", "rojo",
    "azul", "verde", "hola", "playa", "parque", "mariposa", "flor", "flores", "hoy", "mañana",
];

/// Characters whose presence marks Spanish orthography
pub const SPANISH_DIACRITICS: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'ü', 'ñ', '¿', '¡'];

/// Puerto Rican lexical markers, compiled as a single vocabulary pattern
pub const PUERTO_RICAN_VOCABULARY: &[&str] = &[
    "guagua", "zafacón", "zafacon", "mahones", "chiringa", "habichuelas", "bizcocho", "piragua",
    "coquí", "coqui", "chavos", "pana", "boricua", "jíbaro", "jibaro", "chévere", "chevere",
    "bregar", "janguear", "corillo", "ahorita", "mofongo", "limber", "pantallas", "wepa",
];

/// Puerto Rican phonetic markers: (label, pattern)
pub const PUERTO_RICAN_PHONETIC_PATTERNS: &[(&str, &str)] = &[
    ("dropped-d-ao", r"(?i)\b\p{L}+ao\b"),
    ("eto-ending", r"(?i)\b\p{L}+eto\b"),
];

/// Puerto Rican grammar and discourse markers: (label, pattern)
pub const PUERTO_RICAN_GRAMMAR_PATTERNS: &[(&str, &str)] = &[
    ("tag-question", r"(?i)¿\s*(?:verdad|oíste|oiste|ves|sabes|entiendes)\s*\?"),
    ("discourse-marker", r"(?i)\b(?:ay bendito|bendito|mira|oye|nah)\b"),
];

/// Code-switching detectors: (label, pattern)
pub const CODE_SWITCHING_PATTERNS: &[(&str, &str)] = &[
    (
        "english-function-word-in-spanish",
        r"(?i)\b(?:el|la|los|las|de|que|en|con|por|para)\s+(?:the|and|with|for|of|my|your)\b",
    ),
    (
        "spanish-connective-english-gerund",
        r"(?i)\b(?:y|pero|porque|cuando|que|estaba|estoy|está)\s+\p{L}+ing\b",
    ),
    (
        "english-connective-spanish-word",
        r"(?i)\b(?:and|but|because|the|with)\s+\p{L}*[áéíóúñ]\p{L}*",
    ),
    (
        "spanish-inflected-anglicism",
        r"(?i)\b(?:jangu|parqu|chequ|text|print|googl|lonch)e(?:ar|ando|amos|aron|an|a|o|é)\b",
    ),
];

/// Vowel pairs that merge into one Spanish nucleus (diphthongs)
pub const SPANISH_DIPHTHONGS: &[&str] = &[
    "ai", "au", "ei", "eu", "oi", "ou", "ia", "ie", "io", "iu", "ua", "ue", "ui", "uo",
];

/// Consonant pairs that always begin a Spanish syllable together
pub const SPANISH_INSEPARABLE_CLUSTERS: &[&str] = &[
    "bl", "br", "cl", "cr", "dr", "fl", "fr", "gl", "gr", "kl", "kr", "pl", "pr", "tl", "tr",
    "ch", "ll", "rr",
];

/// English spelling patterns a young reader has to decode: (label, pattern)
pub const ENGLISH_PHONETIC_PATTERNS: &[(&str, &str)] = &[
    ("th-digraph", "th"),
    ("sh-digraph", "sh"),
    ("ch-digraph", "ch"),
    ("ph-digraph", "ph"),
    ("wh-digraph", "^wh"),
    ("ck-digraph", "ck"),
    ("ng-ending", "ng$"),
    ("igh-trigraph", "igh"),
    ("silent-k", "^kn"),
    ("silent-w", "^wr"),
    ("silent-e", "[aeiou][^aeiouy]e$"),
    ("vowel-team", "ee|oo|ea|ai|ay|oa|ow|ou|oi|oy"),
    ("r-controlled", "[aeiou]r"),
];

/// Spanish spelling patterns a young reader has to decode: (label, pattern)
pub const SPANISH_PHONETIC_PATTERNS: &[(&str, &str)] = &[
    ("ll-digraph", "ll"),
    ("rr-trill", "rr"),
    ("ch-digraph", "ch"),
    ("enye", "ñ"),
    ("qu-silent-u", "qu[eéií]"),
    ("gu-silent-u", "gu[eéií]"),
    ("dieresis", "gü"),
    ("silent-h", "(?:^|[^c])h"),
    ("soft-c", "c[eéií]"),
    ("soft-g", "g[eéií]"),
    ("b-v-sound", "v"),
    ("z-sound", "z"),
    ("x-sound", "x"),
    ("initial-r", "^r"),
];

/// Common English misspellings: (misspelling, correction)
pub const ENGLISH_MISSPELLINGS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("recieve", "receive"),
    ("becuase", "because"),
    ("freind", "friend"),
    ("wich", "which"),
    ("alot", "a lot"),
    ("definately", "definitely"),
    ("beleive", "believe"),
    ("untill", "until"),
    ("wierd", "weird"),
    ("thier", "their"),
    ("occured", "occurred"),
    ("scool", "school"),
    ("frend", "friend"),
];

/// Common Spanish misspellings: (misspelling, correction)
pub const SPANISH_MISSPELLINGS: &[(&str, &str)] = &[
    ("haver", "haber"),
    ("nesecito", "necesito"),
    ("desir", "decir"),
    ("llendo", "yendo"),
    ("haiga", "haya"),
    ("iva", "iba"),
    ("dijieron", "dijeron"),
    ("trajieron", "trajeron"),
    ("hechar", "echar"),
    ("ubo", "hubo"),
    ("enpezar", "empezar"),
    ("vien", "bien"),
    ("escuala", "escuela"),
    ("aser", "hacer"),
];

/// Accent-folded Spanish forms whose written accent changes meaning (el/él, esta/está)
pub const SPANISH_DIACRITICAL_FORMS: &[&str] = &[
    "el", "tu", "mi", "si", "se", "te", "de", "mas", "aun", "esta", "este", "estas", "estos",
    "solo", "como", "que", "donde", "cuando", "quien", "cual", "cuanto", "porque", "papa", "mama",
];

/// What a grammar rule's pattern is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// The whole normalized text
    Text,
    /// Each sentence on its own, prefixed by the `¿`/`¡` that opened it, if any
    Sentence,
}

/// A regex grammar rule with its canned feedback
#[derive(Debug, Clone, Copy)]
pub struct GrammarRuleSpec {
    pub id: &'static str,
    pub pattern: &'static str,
    pub message: &'static str,
    pub suggestion: &'static str,
    pub scope: RuleScope,
}

pub const ENGLISH_GRAMMAR_RULES: &[GrammarRuleSpec] = &[
    GrammarRuleSpec {
        id: "a-before-vowel",
        pattern: r"(?i)\ba\s+[aeiou]\p{L}*",
        message: "Use 'an' before a word that starts with a vowel sound",
        suggestion: "an",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "an-before-consonant",
        pattern: r"(?i)\ban\s+[bcdfgjklmnpqrstvwxz]\p{L}*",
        message: "Use 'a' before a word that starts with a consonant sound",
        suggestion: "a",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "duplicated-article",
        pattern: r"(?i)\b(?:the|a|an)\s+(?:the|a|an)\b",
        message: "Two articles appear in a row",
        suggestion: "Remove one of the articles",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "third-person-agreement",
        pattern: r"(?i)\b(?:he|she|it)\s+(?:are|were|have|don't)\b",
        message: "The verb does not agree with a singular subject",
        suggestion: "Use is/was/has/doesn't with he, she or it",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "plural-agreement",
        pattern: r"(?i)\b(?:i|you|we|they)\s+(?:is|was|has|doesn't)\b",
        message: "The verb does not agree with the subject",
        suggestion: "Use am/are/were/have/don't with I, you, we or they",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "modal-of",
        pattern: r"(?i)\b(?:could|should|would|must)\s+of\b",
        message: "Use 'have' after could, should, would or must",
        suggestion: "have",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "space-before-punctuation",
        pattern: r"[ ]+[,.;:!?]",
        message: "Punctuation should follow the word without a space",
        suggestion: "Remove the space before the punctuation mark",
        scope: RuleScope::Text,
    },
];

pub const SPANISH_GRAMMAR_RULES: &[GrammarRuleSpec] = &[
    GrammarRuleSpec {
        id: "duplicated-article",
        pattern: r"(?i)\b(?:el|la|los|las|un|una|unos|unas)\s+(?:el|la|los|las|un|una|unos|unas)\b",
        message: "Hay dos artículos seguidos",
        suggestion: "Elimine uno de los artículos",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "contraction-del",
        pattern: r"(?i)\bde\s+el\b",
        message: "'de el' se contrae",
        suggestion: "del",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "contraction-al",
        pattern: r"(?i)\ba\s+el\b",
        message: "'a el' se contrae",
        suggestion: "al",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "stressed-a-feminine",
        pattern: r"(?i)\bla\s+(?:agua|águila|aguila|hambre|alma|hacha|ala|arma)\b",
        message: "Los sustantivos femeninos que empiezan con 'a' tónica usan 'el'",
        suggestion: "el",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "masculine-article-feminine-noun",
        pattern: r"(?i)\b(?:el|un)\s+\p{L}+(?:ción|sión|dad|tud)\b",
        message: "El artículo no concuerda con un sustantivo femenino",
        suggestion: "la / una",
        scope: RuleScope::Text,
    },
    GrammarRuleSpec {
        id: "missing-opening-question-mark",
        pattern: r"^[^¿¡]+\?",
        message: "Las preguntas en español empiezan con '¿'",
        suggestion: "¿",
        scope: RuleScope::Sentence,
    },
    GrammarRuleSpec {
        id: "missing-opening-exclamation-mark",
        pattern: r"^[^¿¡]+!",
        message: "Las exclamaciones en español empiezan con '¡'",
        suggestion: "¡",
        scope: RuleScope::Sentence,
    },
];

/// Title abbreviations whose period never ends a sentence ("Dr. Smith", "Sra. Rivera")
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Dr.", "Dra.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Sra.", "Srta.", "Lcdo.", "Lcda.", "Ud.",
    "Uds.", "St.",
];

/// Stop and common word sets for one language
#[derive(Debug, Clone)]
pub struct WordLists {
    stop_words: HashSet<&'static str>,
    common_words: HashSet<&'static str>,
}

impl WordLists {
    pub fn english() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            common_words: ENGLISH_COMMON_WORDS.iter().copied().collect(),
        }
    }

    pub fn spanish() -> Self {
        Self {
            stop_words: SPANISH_STOP_WORDS.iter().copied().collect(),
            common_words: SPANISH_COMMON_WORDS.iter().copied().collect(),
        }
    }

    /// Expects an already lower-cased word
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Expects an already lower-cased word
    pub fn is_common_word(&self, word: &str) -> bool {
        self.common_words.contains(word)
    }
}

/// Efficient title-abbreviation lookup
pub struct AbbreviationChecker {
    title_abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            title_abbreviations: TITLE_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    pub fn is_title_abbreviation(&self, word: &str) -> bool {
        self.title_abbreviations.contains(word)
    }

    /// Check if text ends with a title abbreviation that must not close a sentence
    pub fn ends_with_title_abbreviation(&self, text: &str) -> bool {
        text.split_whitespace()
            .last()
            .map(|last_word| {
                let clean_word = last_word.trim_start_matches(|c: char| {
                    matches!(c, '"' | '\'' | '\u{201C}' | '\u{2018}' | '(' | '¿' | '¡')
                });
                self.is_title_abbreviation(clean_word)
            })
            .unwrap_or(false)
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// A compiled pattern carrying the label it reports under
pub(crate) struct LabeledPattern {
    pub(crate) label: &'static str,
    pub(crate) regex: Regex,
}

impl LabeledPattern {
    pub(crate) fn compile_all(specs: &[(&'static str, &str)]) -> Result<Vec<Self>> {
        specs
            .iter()
            .map(|&(label, pattern)| {
                Ok(Self {
                    label,
                    regex: Regex::new(pattern)?,
                })
            })
            .collect()
    }
}

/// Misspelling table for a language; languages without one get an empty table
pub fn misspellings_for(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::English => ENGLISH_MISSPELLINGS,
        Language::Spanish | Language::PuertoRicanSpanish => SPANISH_MISSPELLINGS,
        Language::Other => &[],
    }
}

/// Grammar rule table for a language; languages without one get an empty table
pub fn grammar_rules_for(language: Language) -> &'static [GrammarRuleSpec] {
    match language {
        Language::English => ENGLISH_GRAMMAR_RULES,
        Language::Spanish | Language::PuertoRicanSpanish => SPANISH_GRAMMAR_RULES,
        Language::Other => &[],
    }
}

/// Strip Spanish written accents (keeps ñ, which is a distinct letter)
pub fn fold_accents(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    static SHARED_CHECKER: OnceLock<AbbreviationChecker> = OnceLock::new();

    fn get_checker() -> &'static AbbreviationChecker {
        SHARED_CHECKER.get_or_init(AbbreviationChecker::new)
    }

    #[test]
    fn test_diphthong_whitelist_has_fourteen_pairs() {
        assert_eq!(SPANISH_DIPHTHONGS.len(), 14);
        let unique: HashSet<_> = SPANISH_DIPHTHONGS.iter().collect();
        assert_eq!(unique.len(), 14);
    }

    #[test]
    fn test_exactly_four_code_switching_patterns() {
        assert_eq!(CODE_SWITCHING_PATTERNS.len(), 4);
    }

    #[test]
    fn test_word_lists() {
        let english = WordLists::english();
        assert!(english.is_stop_word("the"));
        assert!(english.is_common_word("cat"));
        assert!(!english.is_stop_word("gato"));

        let spanish = WordLists::spanish();
        assert!(spanish.is_stop_word("los"));
        assert!(spanish.is_common_word("niños"));
        assert!(!spanish.is_common_word("cat"));
    }

    #[test]
    fn test_title_abbreviations() {
        let checker = get_checker();
        let cases = [
            ("Call Dr.", true),
            ("Vino la Sra.", true),
            ("He said \"Mr.", true),
            ("This is a sentence.", false),
            ("", false),
        ];
        for (text, expected) in cases {
            assert_eq!(checker.ends_with_title_abbreviation(text), expected, "failed for: {text}");
        }
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("mamá"), "mama");
        assert_eq!(fold_accents("Pingüino"), "Pinguino");
        assert_eq!(fold_accents("niño"), "niño");
    }

    #[test]
    fn test_every_table_pattern_compiles() {
        LabeledPattern::compile_all(CODE_SWITCHING_PATTERNS).unwrap();
        LabeledPattern::compile_all(PUERTO_RICAN_PHONETIC_PATTERNS).unwrap();
        LabeledPattern::compile_all(PUERTO_RICAN_GRAMMAR_PATTERNS).unwrap();
        LabeledPattern::compile_all(ENGLISH_PHONETIC_PATTERNS).unwrap();
        LabeledPattern::compile_all(SPANISH_PHONETIC_PATTERNS).unwrap();
        for rule in ENGLISH_GRAMMAR_RULES.iter().chain(SPANISH_GRAMMAR_RULES) {
            assert!(Regex::new(rule.pattern).is_ok(), "rule {} failed to compile", rule.id);
        }
    }

    #[test]
    fn test_tables_for_other_language_are_empty() {
        assert!(misspellings_for(Language::Other).is_empty());
        assert!(grammar_rules_for(Language::Other).is_empty());
        assert!(!grammar_rules_for(Language::PuertoRicanSpanish).is_empty());
    }
}
