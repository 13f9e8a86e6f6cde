// WHY: Shared vocabulary of the pipeline - language codes, grade levels and difficulty labels
// Every stage takes the language explicitly so one instance can serve concurrent callers

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language or dialect a text is analysed as
///
/// Deserializes leniently: an unknown code becomes `Language::Other` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "es-PR")]
    PuertoRicanSpanish,
    /// Any code outside the supported set; selects the hybrid readability formula
    #[serde(rename = "other")]
    Other,
}

impl Language {
    /// Wire code used in reports and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::PuertoRicanSpanish => "es-PR",
            Language::Other => "other",
        }
    }

    /// Lenient parse: unknown codes degrade to `Language::Other` instead of failing
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or(Language::Other)
    }

    /// True for standard Spanish and the Puerto Rican dialect
    pub fn is_spanish(&self) -> bool {
        matches!(self, Language::Spanish | Language::PuertoRicanSpanish)
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Language::English),
            "es" | "es-es" | "es-mx" => Ok(Language::Spanish),
            "es-pr" => Ok(Language::PuertoRicanSpanish),
            other => bail!("Unsupported language code: {other} (expected en, es or es-PR)"),
        }
    }
}

/// Elementary grade band a text is judged appropriate for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "K")]
    Kindergarten,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "5")]
    Fifth,
}

impl GradeLevel {
    const ALL: [GradeLevel; 6] = [
        GradeLevel::Kindergarten,
        GradeLevel::First,
        GradeLevel::Second,
        GradeLevel::Third,
        GradeLevel::Fourth,
        GradeLevel::Fifth,
    ];

    /// 0 for kindergarten through 5 for fifth grade; larger indexes saturate at fifth grade
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeLevel::Kindergarten => "K",
            GradeLevel::First => "1",
            GradeLevel::Second => "2",
            GradeLevel::Third => "3",
            GradeLevel::Fourth => "4",
            GradeLevel::Fifth => "5",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GradeLevel {
    type Err = anyhow::Error;

    fn from_str(label: &str) -> Result<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "K" | "0" => Ok(GradeLevel::Kindergarten),
            "1" => Ok(GradeLevel::First),
            "2" => Ok(GradeLevel::Second),
            "3" => Ok(GradeLevel::Third),
            "4" => Ok(GradeLevel::Fourth),
            "5" => Ok(GradeLevel::Fifth),
            other => bail!("Unknown grade level: {other} (expected K or 1-5)"),
        }
    }
}

/// Word-level pronunciation difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Difficult,
}

/// Text-level reading difficulty label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingDifficulty {
    VeryEasy,
    Easy,
    Moderate,
    Challenging,
    Difficult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::PuertoRicanSpanish.to_string(), "es-PR");
        assert_eq!("es-PR".parse::<Language>().unwrap(), Language::PuertoRicanSpanish);
        assert_eq!("es_pr".parse::<Language>().unwrap(), Language::PuertoRicanSpanish);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn test_unknown_code_is_strict_error_but_lenient_other() {
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::from_code("fr"), Language::Other);
        assert_eq!(Language::from_code("es"), Language::Spanish);
    }

    #[test]
    fn test_language_serde_codes() {
        let json = serde_json::to_string(&Language::PuertoRicanSpanish).unwrap();
        assert_eq!(json, "\"es-PR\"");
        let parsed: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(parsed, Language::Spanish);
        let parsed: Language = serde_json::from_str("\"es-PR\"").unwrap();
        assert_eq!(parsed, Language::PuertoRicanSpanish);
        let parsed: Language = serde_json::from_str("\"other\"").unwrap();
        assert_eq!(parsed, Language::Other);
    }

    #[test]
    fn test_unknown_code_deserializes_as_other() {
        let parsed: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, Language::Other);
    }

    #[test]
    fn test_grade_level_ordering_and_saturation() {
        assert!(GradeLevel::Kindergarten < GradeLevel::Fifth);
        assert_eq!(GradeLevel::from_index(0), GradeLevel::Kindergarten);
        assert_eq!(GradeLevel::from_index(3), GradeLevel::Third);
        assert_eq!(GradeLevel::from_index(42), GradeLevel::Fifth);
        assert_eq!(GradeLevel::Fourth.index(), 4);
        assert_eq!("k".parse::<GradeLevel>().unwrap(), GradeLevel::Kindergarten);
        assert_eq!(serde_json::to_string(&GradeLevel::Second).unwrap(), "\"2\"");
    }
}
