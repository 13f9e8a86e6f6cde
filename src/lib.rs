pub mod batch;
pub mod config;
pub mod detector;
pub mod language;
pub mod lexicon;
pub mod phonetic;
pub mod processor;
pub mod quality;
pub mod readability;
pub mod text;

// Re-export main types for convenient access
pub use config::ProcessorOptions;
pub use detector::{
    AlternativeLanguage, CodeSwitchMatch, DialectMarker, LanguageDetectionResult,
    LanguageDetector, LanguageScores, MarkerKind,
};
pub use language::{Difficulty, GradeLevel, Language, ReadingDifficulty};
pub use phonetic::{PhoneticProcessor, PronunciationGuide, SyllableInfo};
pub use processor::{LanguageProcessor, LanguageReport, ReportSummary};
pub use quality::{
    CheckSummary, GrammarError, QualityValidator, Severity, SpellingError, SpellingErrorKind,
    ValidationResult,
};
pub use readability::{ReadabilityAnalyzer, ReadabilityDetails, ReadabilityMethod, ReadabilityScore};
pub use text::{
    Paragraph, ProcessedText, Sentence, TextProcessor, TextStatistics, Token, TokenKind,
};

// Re-export batch types for the CLI and benchmarks
pub use batch::{analyze_files, expand_inputs, BatchConfig, BatchReport, FileStats};
