// WHY: Grade-level scoring with the formula that fits each language
// Flesch-Kincaid and INFLESZ thresholds are separate tables because the two scales are not
// comparable at small values

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::language::{GradeLevel, Language, ReadingDifficulty};
use crate::phonetic::PhoneticProcessor;
use crate::text::ProcessedText;

const COMPLEX_WORD_SYLLABLES: usize = 3;
const FLESCH_KINCAID_MAX: f64 = 12.0;
const HYBRID_COMPONENT_MAX: f64 = 4.0;

const LONG_SENTENCE_WORDS: f64 = 15.0;
const LONG_WORD_SYLLABLES: f64 = 2.0;
const COMPLEX_WORD_PERCENT: f64 = 15.0;

/// Perspicuity lower bounds for Fernández-Huerta grades 1..=7; anything lower is grade 8
const PERSPICUITY_BUCKETS: [f64; 7] = [90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityMethod {
    FleschKincaid,
    FernandezHuerta,
    Hybrid,
}

impl ReadabilityMethod {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => ReadabilityMethod::FleschKincaid,
            Language::Spanish | Language::PuertoRicanSpanish => ReadabilityMethod::FernandezHuerta,
            Language::Other => ReadabilityMethod::Hybrid,
        }
    }
}

/// Raw counts and ratios behind a score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityDetails {
    pub total_words: usize,
    pub total_sentences: usize,
    pub total_syllables: usize,
    pub complex_words: usize,
    pub words_per_sentence: f64,
    pub syllables_per_word: f64,
    pub complex_word_percentage: f64,
    /// Fernández-Huerta perspicuity, present only for Spanish texts with words
    pub perspicuity: Option<f64>,
}

/// Readability outcome
///
/// `score` is the method's own number: the clamped Flesch-Kincaid grade (0..=12), the
/// Fernández-Huerta grade bucket (1..=8) or the hybrid total (0..=12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityScore {
    pub score: f64,
    pub grade_level: GradeLevel,
    pub difficulty: ReadingDifficulty,
    pub method: ReadabilityMethod,
    pub details: ReadabilityDetails,
    pub recommendations: Vec<String>,
}

impl ReadabilityScore {
    /// True when the text reads at or below `grade`
    pub fn suits_grade(&self, grade: GradeLevel) -> bool {
        self.grade_level <= grade
    }
}

pub struct ReadabilityAnalyzer {
    phonetics: PhoneticProcessor,
}

impl ReadabilityAnalyzer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            phonetics: PhoneticProcessor::new()?,
        })
    }

    pub fn analyze(&self, processed: &ProcessedText, language: Language) -> ReadabilityScore {
        let method = ReadabilityMethod::for_language(language);
        let details = self.collect_details(processed, language);

        if details.total_words == 0 || details.total_sentences == 0 {
            debug!("No words or sentences; readability defaults to 0");
            return ReadabilityScore {
                score: 0.0,
                grade_level: GradeLevel::Kindergarten,
                difficulty: ReadingDifficulty::VeryEasy,
                method,
                details,
                recommendations: recommendations(&ReadabilityDetails::default(), None),
            };
        }

        let (score, grade_level, difficulty) = match method {
            ReadabilityMethod::FleschKincaid => {
                let grade = flesch_kincaid(&details);
                (grade, flesch_kincaid_grade(grade), flesch_kincaid_difficulty(grade))
            }
            ReadabilityMethod::FernandezHuerta => {
                let perspicuity = details.perspicuity.unwrap_or_default();
                let bucket = perspicuity_bucket(perspicuity);
                (
                    bucket as f64,
                    fernandez_huerta_grade(bucket),
                    inflesz_difficulty(perspicuity),
                )
            }
            ReadabilityMethod::Hybrid => {
                let total = hybrid(&details, processed.statistics.average_word_length);
                (total, flesch_kincaid_grade(total), flesch_kincaid_difficulty(total))
            }
        };

        debug!(
            "Readability {:?}: score={:.2} grade={} difficulty={:?}",
            method, score, grade_level, difficulty
        );

        ReadabilityScore {
            score,
            grade_level,
            difficulty,
            method,
            recommendations: recommendations(&details, Some(grade_level)),
            details,
        }
    }

    fn collect_details(&self, processed: &ProcessedText, language: Language) -> ReadabilityDetails {
        let mut total_words = 0;
        let mut total_syllables = 0;
        let mut complex_words = 0;

        for word in processed.words() {
            let syllables = self.phonetics.count_syllables(&word.text, language);
            total_words += 1;
            total_syllables += syllables;
            if syllables >= COMPLEX_WORD_SYLLABLES {
                complex_words += 1;
            }
        }

        let total_sentences = processed.statistics.sentence_count;
        if total_words == 0 || total_sentences == 0 {
            return ReadabilityDetails {
                total_words,
                total_sentences,
                ..Default::default()
            };
        }

        let words_per_sentence = total_words as f64 / total_sentences as f64;
        let syllables_per_word = total_syllables as f64 / total_words as f64;
        let perspicuity = language
            .is_spanish()
            .then(|| 206.84 - 60.0 * syllables_per_word - 1.02 * words_per_sentence);

        ReadabilityDetails {
            total_words,
            total_sentences,
            total_syllables,
            complex_words,
            words_per_sentence,
            syllables_per_word,
            complex_word_percentage: complex_words as f64 / total_words as f64 * 100.0,
            perspicuity,
        }
    }
}

fn flesch_kincaid(details: &ReadabilityDetails) -> f64 {
    (0.39 * details.words_per_sentence + 11.8 * details.syllables_per_word - 15.59)
        .clamp(0.0, FLESCH_KINCAID_MAX)
}

fn hybrid(details: &ReadabilityDetails, average_chars: f64) -> f64 {
    let sentence_length = (details.words_per_sentence / 5.0).min(HYBRID_COMPONENT_MAX);
    let word_length = (average_chars / 2.0).min(HYBRID_COMPONENT_MAX);
    let complexity = (details.complex_word_percentage / 5.0).min(HYBRID_COMPONENT_MAX);
    sentence_length + word_length + complexity
}

fn perspicuity_bucket(perspicuity: f64) -> u8 {
    PERSPICUITY_BUCKETS
        .iter()
        .position(|&bound| perspicuity >= bound)
        .map_or(8, |i| i as u8 + 1)
}

fn fernandez_huerta_grade(bucket: u8) -> GradeLevel {
    GradeLevel::from_index(bucket.saturating_sub(1) as usize)
}

fn flesch_kincaid_grade(score: f64) -> GradeLevel {
    if score < 1.0 {
        GradeLevel::Kindergarten
    } else if score < 2.0 {
        GradeLevel::First
    } else if score < 3.0 {
        GradeLevel::Second
    } else if score < 4.0 {
        GradeLevel::Third
    } else if score < 5.0 {
        GradeLevel::Fourth
    } else {
        GradeLevel::Fifth
    }
}

fn flesch_kincaid_difficulty(score: f64) -> ReadingDifficulty {
    if score < 1.0 {
        ReadingDifficulty::VeryEasy
    } else if score < 3.0 {
        ReadingDifficulty::Easy
    } else if score < 5.0 {
        ReadingDifficulty::Moderate
    } else if score < 8.0 {
        ReadingDifficulty::Challenging
    } else {
        ReadingDifficulty::Difficult
    }
}

/// INFLESZ bands over perspicuity; higher is easier
fn inflesz_difficulty(perspicuity: f64) -> ReadingDifficulty {
    if perspicuity > 80.0 {
        ReadingDifficulty::VeryEasy
    } else if perspicuity > 65.0 {
        ReadingDifficulty::Easy
    } else if perspicuity > 55.0 {
        ReadingDifficulty::Moderate
    } else if perspicuity > 40.0 {
        ReadingDifficulty::Challenging
    } else {
        ReadingDifficulty::Difficult
    }
}

fn recommendations(details: &ReadabilityDetails, grade: Option<GradeLevel>) -> Vec<String> {
    let mut recommendations = Vec::new();

    if details.words_per_sentence > LONG_SENTENCE_WORDS {
        recommendations.push(format!(
            "Shorten sentences: they average {:.1} words (aim for 15 or fewer)",
            details.words_per_sentence
        ));
    }
    if details.syllables_per_word > LONG_WORD_SYLLABLES {
        recommendations.push(format!(
            "Use simpler words: they average {:.1} syllables",
            details.syllables_per_word
        ));
    }
    if details.complex_word_percentage > COMPLEX_WORD_PERCENT {
        recommendations.push(format!(
            "Reduce words of three or more syllables ({:.0}% of the text)",
            details.complex_word_percentage
        ));
    }
    if grade.is_some_and(|g| g >= GradeLevel::Fifth) {
        recommendations.push("Text reads at grade 5 or above; simplify for younger readers".into());
    }

    if recommendations.is_empty() {
        recommendations.push("Reading level is appropriate for the target grades".into());
    }
    recommendations
}
