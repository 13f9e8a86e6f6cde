// WHY: Text processing front-end - normalization, paragraph/sentence segmentation, tokenization
// Produces the ProcessedText every later stage reads; nothing here depends on the language

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::lexicon::AbbreviationChecker;

pub mod normalization;
pub mod tokenizer;

pub use normalization::{normalize_text, normalize_text_into};
pub use tokenizer::{Token, TokenKind, Tokenizer};

/// Sentence = run of non-terminators, optionally closed by terminal punctuation and a quote.
/// Inverted marks ¿ ¡ are boundaries that never become sentence content.
const SENTENCE_PATTERN: &str = r#"[^.!?¿¡]+(?:[.!?]+["'”’»]?)?"#;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A sentence with byte offsets into the normalized text (end exclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_word())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

/// A paragraph with byte offsets into the normalized text (end exclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
    pub sentences: Vec<Sentence>,
}

/// Counts and averages over a processed text; averages are 0 when their denominator is 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub character_count: usize,
    pub unique_word_count: usize,
    pub average_words_per_sentence: f64,
    pub average_sentences_per_paragraph: f64,
    pub average_word_length: f64,
}

/// Result of `TextProcessor::process`
///
/// Positions throughout refer to `normalized_text`; correlating back to `original_text`
/// requires re-normalizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedText {
    pub original_text: String,
    pub normalized_text: String,
    pub paragraphs: Vec<Paragraph>,
    pub statistics: TextStatistics,
}

impl ProcessedText {
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.paragraphs.iter().flat_map(|p| p.sentences.iter())
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences().flat_map(|s| s.tokens.iter())
    }

    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens().filter(|t| t.is_word())
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.word_count == 0
    }
}

/// Segments raw text into paragraphs, sentences and tokens
pub struct TextProcessor {
    tokenizer: Tokenizer,
    sentence_pattern: Regex,
    abbreviations: AbbreviationChecker,
}

impl TextProcessor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            sentence_pattern: Regex::new(SENTENCE_PATTERN)?,
            abbreviations: AbbreviationChecker::new(),
        })
    }

    /// Normalize the text into its canonical form (see `normalize_text`)
    pub fn normalize(&self, text: &str) -> String {
        normalize_text(text)
    }

    /// Tokenize a fragment, offsetting positions by `base_index`
    pub fn tokenize(&self, text: &str, base_index: usize) -> Vec<Token> {
        self.tokenizer.tokenize(text, base_index)
    }

    /// Normalize and segment text; empty input yields an empty, zeroed result
    pub fn process(&self, text: &str) -> ProcessedText {
        let normalized_text = normalize_text(text);
        let paragraphs = self.split_paragraphs(&normalized_text);
        let statistics = compute_statistics(&normalized_text, &paragraphs);

        debug!(
            "Processed {} paragraphs, {} sentences, {} words",
            statistics.paragraph_count, statistics.sentence_count, statistics.word_count
        );

        ProcessedText {
            original_text: text.to_string(),
            normalized_text,
            paragraphs,
            statistics,
        }
    }

    fn split_paragraphs(&self, normalized: &str) -> Vec<Paragraph> {
        let mut paragraphs = Vec::new();
        let mut offset = 0;

        for chunk in normalized.split(PARAGRAPH_SEPARATOR) {
            let chunk_start = offset;
            offset += chunk.len() + PARAGRAPH_SEPARATOR.len();

            let Some((start, end)) = trim_span(normalized, chunk_start, chunk_start + chunk.len())
            else {
                continue;
            };
            let text = &normalized[start..end];
            paragraphs.push(Paragraph {
                text: text.to_string(),
                start_index: start,
                end_index: end,
                sentences: self.split_sentences(text, start),
            });
        }

        paragraphs
    }

    fn split_sentences(&self, paragraph: &str, base_index: usize) -> Vec<Sentence> {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        // Start/end of a sentence held open because it ends in a title abbreviation
        let mut pending: Option<(usize, usize)> = None;

        for mat in self.sentence_pattern.find_iter(paragraph) {
            let Some((start, end)) = trim_span(paragraph, mat.start(), mat.end()) else {
                continue;
            };
            if !paragraph[start..end].chars().any(char::is_alphanumeric) {
                continue;
            }

            let start = pending.take().map_or(start, |(pending_start, _)| pending_start);
            if self.abbreviations.ends_with_title_abbreviation(&paragraph[start..end]) {
                pending = Some((start, end));
                continue;
            }
            spans.push((start, end));
        }
        if let Some(span) = pending {
            spans.push(span);
        }

        spans
            .into_iter()
            .map(|(start, end)| {
                let text = &paragraph[start..end];
                Sentence {
                    text: text.to_string(),
                    start_index: base_index + start,
                    end_index: base_index + end,
                    tokens: self.tokenizer.tokenize(text, base_index + start),
                }
            })
            .collect()
    }
}

/// Shrink `[start, end)` of `text` to exclude surrounding whitespace; None when nothing remains
fn trim_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading == slice.len() {
        return None;
    }
    Some((start + leading, end - trailing))
}

fn compute_statistics(normalized: &str, paragraphs: &[Paragraph]) -> TextStatistics {
    let sentences: Vec<&Sentence> = paragraphs.iter().flat_map(|p| p.sentences.iter()).collect();
    let words: Vec<&Token> = sentences.iter().flat_map(|s| s.words()).collect();

    let word_count = words.len();
    let sentence_count = sentences.len();
    let paragraph_count = paragraphs.len();
    let unique_word_count = words
        .iter()
        .map(|w| w.lowercase())
        .collect::<HashSet<_>>()
        .len();
    let total_word_chars: usize = words.iter().map(|w| w.text.chars().count()).sum();

    TextStatistics {
        word_count,
        sentence_count,
        paragraph_count,
        character_count: normalized.chars().count(),
        unique_word_count,
        average_words_per_sentence: ratio(word_count, sentence_count),
        average_sentences_per_paragraph: ratio(sentence_count, paragraph_count),
        average_word_length: ratio(total_word_chars, word_count),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> TextProcessor {
        TextProcessor::new().unwrap()
    }

    fn sentence_texts(processed: &ProcessedText) -> Vec<&str> {
        processed.sentences().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_basic_segmentation() {
        let processed = processor().process("The cat sat. The dog ran!\n\nIs it fun? Yes.");
        assert_eq!(processed.statistics.paragraph_count, 2);
        assert_eq!(
            sentence_texts(&processed),
            vec!["The cat sat.", "The dog ran!", "Is it fun?", "Yes."]
        );
        assert_eq!(processed.statistics.word_count, 10);
        assert!((processed.statistics.average_words_per_sentence - 2.5).abs() < 1e-9);
        assert!((processed.statistics.average_sentences_per_paragraph - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_marks_are_boundaries_not_content() {
        let processed = processor().process("¡Hola! ¿Cómo estás? Bien.");
        assert_eq!(sentence_texts(&processed), vec!["Hola!", "Cómo estás?", "Bien."]);
    }

    #[test]
    fn test_mid_sentence_inverted_mark_splits() {
        let processed = processor().process("Los niños juegan en la guagua, ¿verdad?");
        assert_eq!(
            sentence_texts(&processed),
            vec!["Los niños juegan en la guagua,", "verdad?"]
        );
    }

    #[test]
    fn test_trailing_quote_stays_attached() {
        let processed = processor().process("She said \"Run!\" Then we ran.");
        assert_eq!(sentence_texts(&processed), vec!["She said \"Run!\"", "Then we ran."]);
    }

    #[test]
    fn test_title_abbreviation_does_not_split() {
        let processed = processor().process("Dr. Soto came. La Sra. Rivera llegó.");
        assert_eq!(sentence_texts(&processed), vec!["Dr. Soto came.", "La Sra. Rivera llegó."]);
    }

    #[test]
    fn test_unterminated_remainder_is_a_sentence() {
        let processed = processor().process("hola hola mundo");
        assert_eq!(sentence_texts(&processed), vec!["hola hola mundo"]);
        assert_eq!(processed.statistics.word_count, 3);
        assert_eq!(processed.statistics.unique_word_count, 2);
    }

    #[test]
    fn test_offsets_index_the_normalized_text() {
        let processed = processor().process("  Uno  dos.\r\n\r\n\r\nTres   cuatro?  ");
        assert_eq!(processed.normalized_text, "Uno dos.\n\nTres cuatro?");
        for paragraph in &processed.paragraphs {
            assert_eq!(
                &processed.normalized_text[paragraph.start_index..paragraph.end_index],
                paragraph.text
            );
            for sentence in &paragraph.sentences {
                assert_eq!(
                    &processed.normalized_text[sentence.start_index..sentence.end_index],
                    sentence.text
                );
                for token in &sentence.tokens {
                    assert_eq!(&processed.normalized_text[token.position..token.end()], token.text);
                }
            }
        }
    }

    #[test]
    fn test_whitespace_only_blank_line_splits_paragraphs() {
        for text in ["Uno dos.\n \nTres cuatro.", "Uno dos.  \n\t\n  Tres cuatro."] {
            let processed = processor().process(text);
            assert_eq!(processed.normalized_text, "Uno dos.\n\nTres cuatro.");
            assert_eq!(processed.statistics.paragraph_count, 2, "failed for: {text:?}");
            assert!((processed.statistics.average_sentences_per_paragraph - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_input_has_zero_averages() {
        let processed = processor().process("   \n\n  ");
        assert!(processed.paragraphs.is_empty());
        assert!(processed.is_empty());
        assert_eq!(processed.statistics.sentence_count, 0);
        assert_eq!(processed.statistics.average_words_per_sentence, 0.0);
        assert_eq!(processed.statistics.average_sentences_per_paragraph, 0.0);
        assert_eq!(processed.statistics.average_word_length, 0.0);
    }

    #[test]
    fn test_punctuation_only_paragraph_has_no_sentences() {
        let processed = processor().process("...\n\nThe end.");
        assert_eq!(processed.statistics.paragraph_count, 2);
        assert!(processed.paragraphs[0].sentences.is_empty());
        assert_eq!(processed.statistics.sentence_count, 1);
    }
}
