// WHY: Pronunciation guides for vocabulary words - syllables, stress, decoding patterns, difficulty
// Syllable counts produced here also drive the readability formulas

use anyhow::Result;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::language::{Difficulty, Language};
use crate::lexicon::{LabeledPattern, ENGLISH_PHONETIC_PATTERNS, SPANISH_PHONETIC_PATTERNS};

pub mod syllables;

pub use syllables::SyllableInfo;

const SYLLABLE_WEIGHT: f64 = 0.5;
const PATTERN_WEIGHT: f64 = 0.3;
const CLUSTER_PENALTY: f64 = 0.5;

const STRESS_MARK: char = 'ˈ';
const SYLLABLE_SEPARATOR: &str = "·";

/// Pronunciation guide for one word, e.g. `ma·ri·ˈpo·sa`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationGuide {
    pub word: String,
    pub pronunciation: String,
    pub syllables: Vec<SyllableInfo>,
    /// Index of the stressed syllable
    pub stress_pattern: usize,
    /// Labels of the decoding patterns present in the word
    pub phonetic_patterns: Vec<String>,
    pub difficulty: Difficulty,
    pub difficulty_score: f64,
}

impl PronunciationGuide {
    pub fn syllable_count(&self) -> usize {
        self.syllables.len()
    }
}

/// Syllabifier and pronunciation-guide builder; holds only compiled pattern tables
pub struct PhoneticProcessor {
    english_patterns: Vec<LabeledPattern>,
    spanish_patterns: Vec<LabeledPattern>,
}

impl PhoneticProcessor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            english_patterns: LabeledPattern::compile_all(ENGLISH_PHONETIC_PATTERNS)?,
            spanish_patterns: LabeledPattern::compile_all(SPANISH_PHONETIC_PATTERNS)?,
        })
    }

    /// Split a word into syllables with stress marked
    ///
    /// The word is lowercased and stripped of surrounding punctuation first. Never returns an
    /// empty list: a word with no vowel (or no characters) comes back as a single syllable.
    pub fn extract_syllables(&self, word: &str, language: Language) -> Vec<SyllableInfo> {
        let prepared = prepare_word(word);
        self.syllables_of(&prepared, language)
    }

    /// Syllable count as used by the readability formulas
    pub fn count_syllables(&self, word: &str, language: Language) -> usize {
        self.extract_syllables(word, language).len()
    }

    pub fn generate_pronunciation_guide(
        &self,
        word: &str,
        language: Language,
    ) -> PronunciationGuide {
        let prepared = prepare_word(word);
        let syllables = self.syllables_of(&prepared, language);
        let stress_pattern = syllables.iter().position(|s| s.stress).unwrap_or(0);

        let pronunciation = syllables
            .iter()
            .map(|s| {
                if s.stress && syllables.len() > 1 {
                    format!("{STRESS_MARK}{}", s.syllable)
                } else {
                    s.syllable.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(SYLLABLE_SEPARATOR);

        let phonetic_patterns: Vec<String> = self
            .patterns_for(language)
            .iter()
            .filter(|p| p.regex.is_match(prepared.as_str()))
            .map(|p| p.label.to_string())
            .collect();

        let complex_cluster = syllables.iter().any(SyllableInfo::has_complex_cluster);
        let difficulty_score = SYLLABLE_WEIGHT * syllables.len() as f64
            + PATTERN_WEIGHT * phonetic_patterns.len() as f64
            + if complex_cluster { CLUSTER_PENALTY } else { 0.0 };

        PronunciationGuide {
            word: word.to_string(),
            pronunciation,
            syllables,
            stress_pattern,
            phonetic_patterns,
            difficulty: difficulty_bucket(difficulty_score),
            difficulty_score,
        }
    }

    /// Guides for each word, in input order
    pub fn batch_process<S: AsRef<str>>(
        &self,
        words: &[S],
        language: Language,
    ) -> Vec<PronunciationGuide> {
        words
            .iter()
            .map(|w| self.generate_pronunciation_guide(w.as_ref(), language))
            .collect()
    }

    fn syllables_of(&self, prepared: &str, language: Language) -> Vec<SyllableInfo> {
        let spanish_rules = language.is_spanish();
        let mut syllables = if spanish_rules {
            syllables::syllabify_spanish(prepared)
        } else {
            syllables::syllabify_english(prepared)
        };

        let stressed = syllables::stress_index(&syllables, prepared, spanish_rules);
        if let Some(syllable) = syllables.get_mut(stressed) {
            syllable.stress = true;
        }
        syllables
    }

    fn patterns_for(&self, language: Language) -> &[LabeledPattern] {
        if language.is_spanish() {
            &self.spanish_patterns
        } else {
            &self.english_patterns
        }
    }
}

fn prepare_word(word: &str) -> String {
    let composed: String = word.nfc().collect();
    composed
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn difficulty_bucket(score: f64) -> Difficulty {
    if score < 2.0 {
        Difficulty::Easy
    } else if score < 4.0 {
        Difficulty::Moderate
    } else {
        Difficulty::Difficult
    }
}
