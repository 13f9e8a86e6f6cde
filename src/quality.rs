// WHY: Spelling, grammar, completeness and consistency checks rolled into one quality score
// The score is a 0.5 baseline plus weighted check averages minus capped penalties; the pass mark
// of 0.7 depends on that exact shape

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::language::Language;
use crate::lexicon::{
    fold_accents, grammar_rules_for, misspellings_for, GrammarRuleSpec, RuleScope,
    SPANISH_DIACRITICAL_FORMS,
};
use crate::text::{ProcessedText, Sentence, Token};

const COMPLETENESS_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.2;
const BASELINE: f64 = 0.5;
const SPELLING_PENALTY: f64 = 0.05;
const SPELLING_PENALTY_CAP: f64 = 0.3;
const GRAMMAR_PENALTY: f64 = 0.03;
const GRAMMAR_PENALTY_CAP: f64 = 0.2;
const VALID_THRESHOLD: f64 = 0.7;

const MIN_WORDS: usize = 5;
const MAX_TERMINAL_STYLES: usize = 2;

const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];
const OPENING_MARKS: &[char] = &['¿', '¡'];
const CLOSING_QUOTES: &[char] = &['"', '\'', '”', '’', '»'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpellingErrorKind {
    RepeatedWord,
    Misspelling,
    Capitalization,
    AccentInconsistency,
}

/// A spelling finding; `position` is a byte offset into the normalized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingError {
    pub word: String,
    pub position: usize,
    pub kind: SpellingErrorKind,
    pub suggestion: Option<String>,
    pub message: String,
}

/// Grammar findings are advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarError {
    pub rule: String,
    pub message: String,
    pub suggestion: String,
    pub text: String,
    pub position: usize,
    pub severity: Severity,
}

/// Named boolean checks averaged into a [0, 1] score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub score: f64,
    pub checks: BTreeMap<String, bool>,
}

impl CheckSummary {
    fn from_checks(checks: &[(&str, bool)]) -> Self {
        let passed = checks.iter().filter(|(_, ok)| *ok).count();
        Self {
            score: passed as f64 / checks.len() as f64,
            checks: checks
                .iter()
                .map(|&(name, ok)| (name.to_string(), ok))
                .collect(),
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.checks
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub overall_score: f64,
    pub spelling_errors: Vec<SpellingError>,
    pub grammar_errors: Vec<GrammarError>,
    pub completeness: CheckSummary,
    pub consistency: CheckSummary,
    pub summary: Vec<String>,
}

impl ValidationResult {
    pub fn spelling_errors_of(
        &self,
        kind: SpellingErrorKind,
    ) -> impl Iterator<Item = &SpellingError> {
        self.spelling_errors.iter().filter(move |e| e.kind == kind)
    }
}

struct GrammarRule {
    spec: GrammarRuleSpec,
    regex: Regex,
}

pub struct QualityValidator {
    english_rules: Vec<GrammarRule>,
    spanish_rules: Vec<GrammarRule>,
    english_misspellings: HashMap<&'static str, &'static str>,
    spanish_misspellings: HashMap<&'static str, &'static str>,
    diacritical_forms: HashSet<&'static str>,
}

impl QualityValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            english_rules: compile_rules(Language::English)?,
            spanish_rules: compile_rules(Language::Spanish)?,
            english_misspellings: misspellings_for(Language::English).iter().copied().collect(),
            spanish_misspellings: misspellings_for(Language::Spanish).iter().copied().collect(),
            diacritical_forms: SPANISH_DIACRITICAL_FORMS.iter().copied().collect(),
        })
    }

    pub fn validate(&self, processed: &ProcessedText, language: Language) -> ValidationResult {
        let spelling_errors = self.check_spelling(processed, language);
        let grammar_errors = self.check_grammar(processed, language);
        let completeness = completeness(processed);
        let consistency = consistency(processed);

        let spelling_penalty =
            (SPELLING_PENALTY * spelling_errors.len() as f64).min(SPELLING_PENALTY_CAP);
        let grammar_penalty =
            (GRAMMAR_PENALTY * grammar_errors.len() as f64).min(GRAMMAR_PENALTY_CAP);
        let overall_score = (COMPLETENESS_WEIGHT * completeness.score
            + CONSISTENCY_WEIGHT * consistency.score
            + BASELINE
            - spelling_penalty
            - grammar_penalty)
            .clamp(0.0, 1.0);
        let is_valid = overall_score >= VALID_THRESHOLD;

        debug!(
            "Validation: score={:.3} valid={} spelling={} grammar={}",
            overall_score,
            is_valid,
            spelling_errors.len(),
            grammar_errors.len()
        );

        let summary = summarize(
            overall_score,
            is_valid,
            &spelling_errors,
            &grammar_errors,
            &completeness,
            &consistency,
        );

        ValidationResult {
            is_valid,
            overall_score,
            spelling_errors,
            grammar_errors,
            completeness,
            consistency,
            summary,
        }
    }

    fn check_spelling(&self, processed: &ProcessedText, language: Language) -> Vec<SpellingError> {
        let misspellings = match language {
            Language::English => Some(&self.english_misspellings),
            Language::Spanish | Language::PuertoRicanSpanish => Some(&self.spanish_misspellings),
            Language::Other => None,
        };

        let mut errors = Vec::new();
        // Accent-folded form -> first spelling seen
        let mut accent_forms: HashMap<String, String> = HashMap::new();

        for sentence in processed.sentences() {
            if let Some(error) = capitalization_error(sentence) {
                errors.push(error);
            }

            for pair in sentence.tokens.windows(2) {
                let (previous, current) = (&pair[0], &pair[1]);
                if is_repeat(previous, current) {
                    errors.push(SpellingError {
                        word: current.text.clone(),
                        position: current.position,
                        kind: SpellingErrorKind::RepeatedWord,
                        suggestion: None,
                        message: format!("The word '{}' is repeated; remove one", current.text),
                    });
                }
            }

            for word in sentence.words() {
                let lower = word.lowercase();

                if let Some(correction) = misspellings.and_then(|table| table.get(lower.as_str())) {
                    errors.push(SpellingError {
                        word: word.text.clone(),
                        position: word.position,
                        kind: SpellingErrorKind::Misspelling,
                        suggestion: Some(correction.to_string()),
                        message: format!(
                            "'{}' is misspelled; did you mean '{}'?",
                            word.text, correction
                        ),
                    });
                }

                if language.is_spanish() {
                    if let Some(error) = self.accent_error(word, &lower, &mut accent_forms) {
                        errors.push(error);
                    }
                }
            }
        }

        errors
    }

    fn accent_error(
        &self,
        word: &Token,
        lower: &str,
        accent_forms: &mut HashMap<String, String>,
    ) -> Option<SpellingError> {
        let folded = fold_accents(lower);
        if self.diacritical_forms.contains(folded.as_str()) {
            return None;
        }

        let first_seen = accent_forms
            .entry(folded)
            .or_insert_with(|| lower.to_string());
        if first_seen.as_str() == lower {
            return None;
        }

        Some(SpellingError {
            word: word.text.clone(),
            position: word.position,
            kind: SpellingErrorKind::AccentInconsistency,
            suggestion: Some(first_seen.clone()),
            message: format!(
                "'{}' is written differently from the earlier '{}'",
                word.text, first_seen
            ),
        })
    }

    fn check_grammar(&self, processed: &ProcessedText, language: Language) -> Vec<GrammarError> {
        let rules: &[GrammarRule] = match language {
            Language::English => &self.english_rules,
            Language::Spanish | Language::PuertoRicanSpanish => &self.spanish_rules,
            Language::Other => &[],
        };
        let normalized = processed.normalized_text.as_str();

        // (start, end) spans each rule runs over, as offsets into the normalized text
        let whole_text = [(0, normalized.len())];
        let sentence_spans: Vec<(usize, usize)> = processed
            .sentences()
            .map(|s| (opening_mark_start(normalized, s.start_index), s.end_index))
            .collect();

        let mut errors = Vec::new();
        for rule in rules {
            let spans: &[(usize, usize)] = match rule.spec.scope {
                RuleScope::Text => &whole_text,
                RuleScope::Sentence => &sentence_spans,
            };
            for &(start, end) in spans {
                let haystack = &normalized[start..end];
                errors.extend(rule.regex.find_iter(haystack).map(|m| GrammarError {
                    rule: rule.spec.id.to_string(),
                    message: rule.spec.message.to_string(),
                    suggestion: rule.spec.suggestion.to_string(),
                    text: haystack[m.range()].to_string(),
                    position: start + m.start(),
                    severity: Severity::Warning,
                }));
            }
        }
        errors
    }
}

/// Start of the `¿`/`¡` that opens the sentence at `sentence_start`, or the sentence start itself
fn opening_mark_start(normalized: &str, sentence_start: usize) -> usize {
    let before = normalized[..sentence_start].trim_end();
    match before.chars().next_back() {
        Some(mark) if OPENING_MARKS.contains(&mark) => before.len() - mark.len_utf8(),
        _ => sentence_start,
    }
}

fn compile_rules(language: Language) -> Result<Vec<GrammarRule>> {
    grammar_rules_for(language)
        .iter()
        .map(|&spec| {
            Ok(GrammarRule {
                spec,
                regex: Regex::new(spec.pattern)?,
            })
        })
        .collect()
}

fn is_repeat(previous: &Token, current: &Token) -> bool {
    previous.is_word() && current.is_word() && previous.lowercase() == current.lowercase()
}

fn capitalization_error(sentence: &Sentence) -> Option<SpellingError> {
    let first = sentence.words().next()?;
    let initial = first.text.chars().next()?;
    if !initial.is_lowercase() {
        return None;
    }

    let suggestion = capitalize(&first.text);
    Some(SpellingError {
        word: first.text.clone(),
        position: first.position,
        kind: SpellingErrorKind::Capitalization,
        message: format!("Sentences should start with a capital letter: '{suggestion}'"),
        suggestion: Some(suggestion),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Terminal punctuation run of a sentence ("." "?!" "..."), ignoring a closing quote
fn terminal_style(sentence: &Sentence) -> Option<&str> {
    let body = sentence.text.trim_end_matches(CLOSING_QUOTES);
    let stem = body.trim_end_matches(TERMINAL_PUNCTUATION);
    let style = &body[stem.len()..];
    (!style.is_empty()).then_some(style)
}

fn starts_capitalized(sentence: &Sentence) -> bool {
    sentence
        .words()
        .next()
        .and_then(|w| w.text.chars().next())
        .is_some_and(|c| !c.is_lowercase())
}

fn completeness(processed: &ProcessedText) -> CheckSummary {
    let sentences: Vec<&Sentence> = processed.sentences().collect();

    CheckSummary::from_checks(&[
        ("has-punctuation", processed.tokens().any(Token::is_punctuation)),
        (
            "has-capitalization",
            processed.normalized_text.chars().any(char::is_uppercase),
        ),
        (
            "sentences-terminated",
            !sentences.is_empty() && sentences.iter().all(|s| terminal_style(s).is_some()),
        ),
        ("minimum-words", processed.statistics.word_count >= MIN_WORDS),
        ("has-sentence", !sentences.is_empty()),
    ])
}

fn consistency(processed: &ProcessedText) -> CheckSummary {
    let sentences: Vec<&Sentence> = processed.sentences().collect();
    let styles: HashSet<&str> = sentences.iter().filter_map(|s| terminal_style(s)).collect();

    CheckSummary::from_checks(&[
        ("terminal-punctuation-styles", styles.len() <= MAX_TERMINAL_STYLES),
        ("no-double-spaces", !processed.original_text.contains("  ")),
        (
            "sentences-capitalized",
            !sentences.is_empty() && sentences.iter().all(|s| starts_capitalized(s)),
        ),
        (
            "paragraphs-have-sentences",
            !processed.paragraphs.is_empty()
                && processed.paragraphs.iter().all(|p| !p.sentences.is_empty()),
        ),
    ])
}

fn summarize(
    overall_score: f64,
    is_valid: bool,
    spelling_errors: &[SpellingError],
    grammar_errors: &[GrammarError],
    completeness: &CheckSummary,
    consistency: &CheckSummary,
) -> Vec<String> {
    let mut summary = Vec::new();

    if !spelling_errors.is_empty() {
        summary.push(format!("{} spelling issue(s) found", spelling_errors.len()));
    }
    if !grammar_errors.is_empty() {
        summary.push(format!("{} grammar issue(s) found", grammar_errors.len()));
    }
    for check in completeness.failed().chain(consistency.failed()) {
        summary.push(format!("Check failed: {check}"));
    }

    summary.push(if is_valid {
        format!("Text passes quality validation (score {overall_score:.2})")
    } else {
        format!("Text needs revision (score {overall_score:.2}, minimum {VALID_THRESHOLD:.2})")
    });
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextProcessor;
    use std::sync::OnceLock;

    fn validate(text: &str, language: Language) -> ValidationResult {
        static VALIDATOR: OnceLock<QualityValidator> = OnceLock::new();
        let validator = VALIDATOR.get_or_init(|| QualityValidator::new().unwrap());
        let processed = TextProcessor::new().unwrap().process(text);
        validator.validate(&processed, language)
    }

    #[test]
    fn test_repeated_word_flagged_once_at_second_occurrence() {
        let result = validate("hola hola mundo", Language::Spanish);
        let repeated: Vec<_> = result
            .spelling_errors_of(SpellingErrorKind::RepeatedWord)
            .collect();
        assert_eq!(repeated.len(), 1);
        assert_eq!(repeated[0].position, 5);
        assert_eq!(repeated[0].word, "hola");
        // Sentence also starts lowercase
        assert_eq!(result.spelling_errors_of(SpellingErrorKind::Capitalization).count(), 1);
    }

    #[test]
    fn test_clean_text_is_valid() {
        let result = validate("The cat sat on the mat. The dog ran to the park.", Language::English);
        assert!(result.spelling_errors.is_empty());
        assert!(result.grammar_errors.is_empty());
        assert_eq!(result.completeness.score, 1.0);
        assert_eq!(result.consistency.score, 1.0);
        assert!((result.overall_score - 1.0).abs() < 1e-9);
        assert!(result.is_valid);
    }

    #[test]
    fn test_empty_text_is_invalid() {
        let result = validate("", Language::English);
        assert_eq!(result.completeness.score, 0.0);
        assert_eq!(result.consistency.score, 0.5);
        assert!((result.overall_score - 0.6).abs() < 1e-9);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_overall_score_formula() {
        let result = validate("hola hola mundo", Language::Spanish);
        // completeness 1/5, consistency 3/4, two spelling errors
        let expected = 0.3 * 0.2 + 0.2 * 0.75 + 0.5 - 0.1;
        assert!((result.overall_score - expected).abs() < 1e-9);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_misspelling_table() {
        let result = validate("Teh dog is my freind.", Language::English);
        let suggestions: Vec<_> = result
            .spelling_errors_of(SpellingErrorKind::Misspelling)
            .filter_map(|e| e.suggestion.as_deref())
            .collect();
        assert_eq!(suggestions, vec!["the", "friend"]);
    }

    #[test]
    fn test_accent_inconsistency_skips_diacritical_pairs() {
        let result = validate(
            "La canción es bonita. Me gusta la cancion. Él come y el perro ladra.",
            Language::Spanish,
        );
        let accents: Vec<_> = result
            .spelling_errors_of(SpellingErrorKind::AccentInconsistency)
            .collect();
        assert_eq!(accents.len(), 1);
        assert_eq!(accents[0].word, "cancion");
        assert_eq!(accents[0].suggestion.as_deref(), Some("canción"));
    }

    #[test]
    fn test_decomposed_accent_matches_composed_spelling() {
        let result = validate(
            "La canción es bonita. Me gusta la cancio\u{301}n.",
            Language::Spanish,
        );
        assert_eq!(
            result.spelling_errors_of(SpellingErrorKind::AccentInconsistency).count(),
            0
        );
    }

    #[test]
    fn test_english_grammar_rules() {
        let result = validate("I saw a elephant. She could of come.", Language::English);
        let rules: Vec<_> = result.grammar_errors.iter().map(|e| e.rule.as_str()).collect();
        assert!(rules.contains(&"a-before-vowel"));
        assert!(rules.contains(&"modal-of"));
        assert!(result.grammar_errors.iter().all(|e| e.severity == Severity::Warning));
        let article = &result.grammar_errors[0];
        assert_eq!(article.text, "a elephant");
        assert_eq!(article.position, 6);
    }

    #[test]
    fn test_spanish_grammar_rules() {
        let result = validate("Vamos a el parque. Como estas?", Language::Spanish);
        let rules: Vec<_> = result.grammar_errors.iter().map(|e| e.rule.as_str()).collect();
        assert!(rules.contains(&"contraction-al"));
        assert!(rules.contains(&"missing-opening-question-mark"));
    }

    #[test]
    fn test_every_unopened_question_reported() {
        let result = validate("Hola. Como estas? Que tal? ¿Bien? ¡Claro! Vamos!", Language::Spanish);
        let questions: Vec<_> = result
            .grammar_errors
            .iter()
            .filter(|e| e.rule == "missing-opening-question-mark")
            .map(|e| (e.text.as_str(), e.position))
            .collect();
        assert_eq!(questions, vec![("Como estas?", 6), ("Que tal?", 18)]);

        let exclamations: Vec<_> = result
            .grammar_errors
            .iter()
            .filter(|e| e.rule == "missing-opening-exclamation-mark")
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(exclamations, vec!["Vamos!"]);
    }

    #[test]
    fn test_inverted_mark_mid_sentence_opens_question() {
        let result = validate("Los niños juegan en la guagua, ¿verdad?", Language::Spanish);
        assert!(result.grammar_errors.is_empty());
    }

    #[test]
    fn test_double_space_checked_on_original_text() {
        let result = validate("The cat sat.  The dog ran.", Language::English);
        assert!(!result.consistency.checks["no-double-spaces"]);
        assert!(result.summary.iter().any(|s| s.contains("no-double-spaces")));
    }

    #[test]
    fn test_terminal_styles() {
        let result = validate("Wow! Is it? Yes. Oh...", Language::English);
        assert!(!result.consistency.checks["terminal-punctuation-styles"]);
        assert!(result.completeness.checks["sentences-terminated"]);
    }

    #[test]
    fn test_other_language_skips_tables() {
        let result = validate("Le chat est noir. Teh chien.", Language::Other);
        assert!(result.grammar_errors.is_empty());
        assert_eq!(result.spelling_errors_of(SpellingErrorKind::Misspelling).count(), 0);
    }
}
