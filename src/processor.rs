// WHY: Orchestrates detection, segmentation, phonetics, readability and validation into one report
// The detected (or forced) language is passed explicitly to every stage, so one processor can
// serve concurrent callers analysing different languages

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::ProcessorOptions;
use crate::detector::{LanguageDetectionResult, LanguageDetector};
use crate::language::{GradeLevel, Language, ReadingDifficulty};
use crate::phonetic::{PhoneticProcessor, PronunciationGuide};
use crate::quality::{QualityValidator, ValidationResult};
use crate::readability::{ReadabilityAnalyzer, ReadabilityScore};
use crate::text::{ProcessedText, TextProcessor};

/// Headline numbers of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub language: Language,
    pub grade_level: GradeLevel,
    pub reading_difficulty: ReadingDifficulty,
    pub quality_score: f64,
    pub is_valid: bool,
    pub word_count: usize,
    pub has_code_switching: bool,
}

/// Full analysis of one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageReport {
    pub detection: LanguageDetectionResult,
    /// Language the analysis stages ran with, forced or detected
    pub language: Language,
    pub text: ProcessedText,
    pub pronunciations: Vec<PronunciationGuide>,
    /// Hardest words to pronounce, hardest first
    pub key_vocabulary: Vec<String>,
    pub readability: ReadabilityScore,
    pub validation: ValidationResult,
    pub summary: ReportSummary,
}

impl LanguageReport {
    /// True when the text reads at or below `grade` and passes quality validation
    pub fn suits_grade(&self, grade: GradeLevel) -> bool {
        self.readability.suits_grade(grade) && self.validation.is_valid
    }
}

/// The full pipeline; every stage is immutable after construction
pub struct LanguageProcessor {
    detector: LanguageDetector,
    text_processor: TextProcessor,
    phonetics: PhoneticProcessor,
    readability: ReadabilityAnalyzer,
    validator: QualityValidator,
}

impl LanguageProcessor {
    pub fn new() -> Result<Self> {
        let start = Instant::now();
        let processor = Self {
            detector: LanguageDetector::new()?,
            text_processor: TextProcessor::new()?,
            phonetics: PhoneticProcessor::new()?,
            readability: ReadabilityAnalyzer::new()?,
            validator: QualityValidator::new()?,
        };
        debug!("Language processor ready in {:?}", start.elapsed());
        Ok(processor)
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    pub fn text_processor(&self) -> &TextProcessor {
        &self.text_processor
    }

    pub fn phonetics(&self) -> &PhoneticProcessor {
        &self.phonetics
    }

    pub fn readability(&self) -> &ReadabilityAnalyzer {
        &self.readability
    }

    pub fn validator(&self) -> &QualityValidator {
        &self.validator
    }

    /// Analyse `text` with default options
    pub fn process(&self, text: &str) -> LanguageReport {
        self.process_with_options(text, &ProcessorOptions::default())
    }

    pub fn process_with_options(&self, text: &str, options: &ProcessorOptions) -> LanguageReport {
        let start = Instant::now();

        let detection = self.detector.detect(text);
        let language = options.language.unwrap_or(detection.language);
        let processed = self.text_processor.process(text);

        let words = unique_words(&processed);
        let guides = self.phonetics.batch_process(&words, language);
        let key_vocabulary = hardest_words(&guides, options.max_vocabulary);

        let readability = self.readability.analyze(&processed, language);
        let validation = self.validator.validate(&processed, language);

        let summary = ReportSummary {
            language,
            grade_level: readability.grade_level,
            reading_difficulty: readability.difficulty,
            quality_score: validation.overall_score,
            is_valid: validation.is_valid,
            word_count: processed.statistics.word_count,
            has_code_switching: detection.has_code_switching,
        };

        info!(
            "Analysed {} words as {} (grade {}, quality {:.2}) in {:?}",
            summary.word_count,
            language,
            summary.grade_level,
            summary.quality_score,
            start.elapsed()
        );

        LanguageReport {
            detection,
            language,
            text: processed,
            pronunciations: if options.pronunciation_guides {
                guides
            } else {
                Vec::new()
            },
            key_vocabulary,
            readability,
            validation,
            summary,
        }
    }

    /// Analyse each text in order with default options
    pub fn process_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<LanguageReport> {
        texts.iter().map(|t| self.process(t.as_ref())).collect()
    }
}

/// Lowercased words in order of first appearance
fn unique_words(processed: &ProcessedText) -> Vec<String> {
    let mut seen = HashSet::new();
    processed
        .words()
        .map(|w| w.lowercase())
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Up to `limit` words by descending difficulty; ties keep first-appearance order
fn hardest_words(guides: &[PronunciationGuide], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&PronunciationGuide> = guides.iter().collect();
    ranked.sort_by(|a, b| b.difficulty_score.total_cmp(&a.difficulty_score));
    ranked
        .into_iter()
        .take(limit)
        .map(|g| g.word.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readability::ReadabilityMethod;
    use std::sync::OnceLock;

    fn processor() -> &'static LanguageProcessor {
        static PROCESSOR: OnceLock<LanguageProcessor> = OnceLock::new();
        PROCESSOR.get_or_init(|| LanguageProcessor::new().unwrap())
    }

    #[test]
    fn test_detected_language_flows_into_stages() {
        let report = processor().process("Los niños juegan en la guagua, ¿verdad?");
        assert_eq!(report.language, Language::PuertoRicanSpanish);
        assert_eq!(report.summary.language, Language::PuertoRicanSpanish);
        assert_eq!(report.readability.method, ReadabilityMethod::FernandezHuerta);
        assert_eq!(report.summary.word_count, 7);
        assert_eq!(report.pronunciations.len(), 7);
    }

    #[test]
    fn test_forced_language_overrides_detection() {
        let options = ProcessorOptions {
            language: Some(Language::Other),
            ..Default::default()
        };
        let report = processor().process_with_options("The cat sat.", &options);
        assert_eq!(report.detection.language, Language::English);
        assert_eq!(report.language, Language::Other);
        assert_eq!(report.readability.method, ReadabilityMethod::Hybrid);
    }

    #[test]
    fn test_key_vocabulary_ranks_by_difficulty() {
        let options = ProcessorOptions {
            max_vocabulary: 2,
            pronunciation_guides: false,
            ..Default::default()
        };
        let report =
            processor().process_with_options("Los niños juegan en la guagua, ¿verdad?", &options);
        // niños and verdad tie at 1.3; first appearance wins
        assert_eq!(report.key_vocabulary, vec!["niños", "verdad"]);
        assert!(report.pronunciations.is_empty());
    }

    #[test]
    fn test_empty_text_report() {
        let report = processor().process("");
        assert_eq!(report.detection.confidence, 0.0);
        assert_eq!(report.readability.score, 0.0);
        assert!(!report.validation.is_valid);
        assert!(report.key_vocabulary.is_empty());
        assert!(!report.suits_grade(GradeLevel::Fifth));
    }

    #[test]
    fn test_grade_gating() {
        let report = processor().process("The cat sat on the mat. The dog ran to the park.");
        assert_eq!(report.summary.grade_level, GradeLevel::Kindergarten);
        assert!(report.summary.is_valid);
        assert!(report.suits_grade(GradeLevel::Kindergarten));
    }

    #[test]
    fn test_batch_preserves_order() {
        let reports = processor().process_batch(&["The dog ran.", "El perro corre."]);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].language, Language::English);
        assert_eq!(reports[1].language, Language::Spanish);
    }
}
